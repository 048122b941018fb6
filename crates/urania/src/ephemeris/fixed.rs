use crate::bodies::{Body, BodySet};
use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::types::{GeoLocation, HousePositions, HouseSystem};
use crate::ephemeris::Ephemeris;
use crate::houses::HouseCusps;
use crate::sidereal::SIDEREAL_GAIN_PER_HOUR;
use chrono::{DateTime, Utc};

/// Sidereal time at 2000-01-01 12:00 UT on the uniform clock, hours
const J2000_SIDEREAL_HOURS: f64 = 18.697_374_558;
const J2000_UNIX_MILLIS: i64 = 946_728_000_000;

/// In-memory ephemeris returning the same chart at every instant.
///
/// Sidereal time runs at the mean sidereal rate from its J2000 value, good
/// to about a second over decades. Houses are equal houses from the
/// configured ascendant, whatever system is asked for.
#[derive(Debug, Clone)]
pub struct FixedEphemeris {
    positions: BodySet,
    asc: f64,
    mc: f64,
}

impl FixedEphemeris {
    pub fn new(positions: BodySet) -> Self {
        Self {
            positions,
            asc: 0.0,
            mc: 270.0,
        }
    }

    pub fn with_angles(mut self, asc: f64, mc: f64) -> Self {
        self.asc = asc;
        self.mc = mc;
        self
    }
}

impl Ephemeris for FixedEphemeris {
    fn positions_at(
        &self,
        instant: DateTime<Utc>,
        bodies: &[Body],
    ) -> Result<BodySet, EphemerisError> {
        bodies
            .iter()
            .map(|&body| match self.positions.get(body) {
                Some(&lon) => Ok((body, lon)),
                None => Err(EphemerisError::CalculationFailed {
                    body: body.name().to_string(),
                    datetime: instant,
                    message: "body not present in fixed chart".to_string(),
                }),
            })
            .collect()
    }

    fn sidereal_time_at(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let hours = (instant.timestamp_millis() - J2000_UNIX_MILLIS) as f64 / 3_600_000.0;
        Ok((J2000_SIDEREAL_HOURS + hours * (1.0 + SIDEREAL_GAIN_PER_HOUR)).rem_euclid(24.0))
    }

    fn house_cusps_at(
        &self,
        _instant: DateTime<Utc>,
        _location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError> {
        Ok(HousePositions {
            system: system.name().to_string(),
            cusps: HouseCusps::equal_from(self.asc),
            asc: self.asc,
            mc: self.mc,
        })
    }
}
