//! Chart assembly: positions, aspects and houses at one instant.

use crate::angles::round_to;
use crate::aspects::{AspectCalculator, AspectRecord};
use crate::bodies::{Body, BodyMap, BodySet, DEFAULT_BODIES};
use crate::ephemeris::{Ephemeris, EphemerisError, GeoLocation, HouseSystem};
use crate::houses::place_bodies;
use crate::sidereal::midnight_utc;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

/// What a chart reports and how aspects are judged.
#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub bodies: Vec<Body>,
    pub aspects: AspectCalculator,
    pub house_system: HouseSystem,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            bodies: DEFAULT_BODIES.to_vec(),
            aspects: AspectCalculator::default(),
            house_system: HouseSystem::default(),
        }
    }
}

/// Positions and aspects for one date, plus houses when a place is known.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Greenwich sidereal time in hours, 4 decimals
    pub sidereal_time: f64,
    /// Longitudes rounded to 2 decimals
    pub positions: BodySet,
    pub aspects: Vec<AspectRecord>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub houses: Option<HousePlacement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HousePlacement {
    pub asc: f64,
    pub mc: f64,
    pub planet_houses: BodyMap<Option<u8>>,
}

/// Chart at `date` + `time` (UT, midnight when absent).
///
/// Positions, sidereal time and houses all use that same instant. Aspects and
/// houses are judged on the reported (rounded) longitudes. `house_system`
/// overrides the one in `settings`.
pub fn compute_chart(
    ephemeris: &dyn Ephemeris,
    settings: &ChartSettings,
    date: NaiveDate,
    time: Option<NaiveTime>,
    location: Option<GeoLocation>,
    house_system: Option<HouseSystem>,
) -> Result<Chart, EphemerisError> {
    let instant = match time {
        Some(t) => date.and_time(t).and_utc(),
        None => midnight_utc(date),
    };

    let positions = ephemeris
        .positions_at(instant, &settings.bodies)?
        .map(|_, &lon| round_to(lon, 2));
    let aspects = settings.aspects.compute(&positions);
    let sidereal_time = ephemeris.sidereal_time_at(instant)?;

    let houses = match location {
        Some(loc) => {
            let system = house_system.unwrap_or(settings.house_system);
            let houses = ephemeris.house_cusps_at(instant, loc, system)?;
            Some(HousePlacement {
                asc: round_to(houses.asc, 2),
                mc: round_to(houses.mc, 2),
                planet_houses: place_bodies(&houses.cusps, &positions),
            })
        }
        None => None,
    };

    Ok(Chart {
        date: date.format("%Y-%m-%d").to_string(),
        sidereal_time: round_to(sidereal_time, 4),
        positions,
        aspects,
        houses,
    })
}

/// One midnight chart per calendar day of a month.
pub fn compute_month(
    ephemeris: &dyn Ephemeris,
    settings: &ChartSettings,
    year: i32,
    month: u32,
) -> Result<Vec<Chart>, EphemerisError> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Ok(Vec::new());
    };

    first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|day| compute_chart(ephemeris, settings, day, None, None, None))
        .collect()
}
