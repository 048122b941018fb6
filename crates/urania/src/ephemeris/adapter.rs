use crate::angles::normalize_degrees;
use crate::bodies::{Body, BodySet, BodySource};
use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::types::{EphemerisMode, GeoLocation, HousePositions, HouseSystem};
use crate::ephemeris::Ephemeris;
use crate::houses::HouseCusps;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path, sidtime};
use swisseph::{AscMc, Cusp};

const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const FLG_SPEED: i32 = 256;
const GREG_CAL: u32 = 1;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    mode: EphemerisMode,
    ephemeris_path: Option<PathBuf>,
    flags: i32,
    // the C library keeps global state between calls
    lock: Mutex<()>,
}

impl SwissEphemerisAdapter {
    /// Create an adapter. In swiss mode the data file path must exist.
    pub fn new(mode: EphemerisMode, ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let (flags, ephemeris_path) = match mode {
            EphemerisMode::Moshier => (FLG_MOSEPH | FLG_SPEED, None),
            EphemerisMode::Swiss => {
                let path = ephemeris_path.unwrap_or_else(default_ephemeris_path);
                if !path.exists() {
                    return Err(EphemerisError::FileNotFound {
                        path: path.display().to_string(),
                        message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                    });
                }
                set_ephe_path(&path.to_string_lossy());
                (FLG_SWIEPH | FLG_SPEED, Some(path))
            }
        };
        log::info!(
            "Swiss Ephemeris adapter ready (mode {:?}, path {})",
            mode,
            ephemeris_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );

        Ok(Self {
            mode,
            ephemeris_path,
            flags,
            lock: Mutex::new(()),
        })
    }

    /// Adapter on the built-in Moshier theory; needs no data files.
    pub fn moshier() -> Self {
        Self {
            mode: EphemerisMode::Moshier,
            ephemeris_path: None,
            flags: FLG_MOSEPH | FLG_SPEED,
            lock: Mutex::new(()),
        }
    }

    pub fn mode(&self) -> EphemerisMode {
        self.mode
    }

    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Longitude of one Swiss Ephemeris body number.
    fn calc_longitude(
        &self,
        body: Body,
        code: i32,
        jd: f64,
        instant: DateTime<Utc>,
    ) -> Result<f64, EphemerisError> {
        let result = calc_ut(jd, code as u32, self.flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                datetime: instant,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        if self.mode == EphemerisMode::Swiss && result.code & FLG_SWIEPH == 0 {
            log::warn!(
                "{} computed without Swiss Ephemeris files (flags {:#x}), check the ephemeris path",
                body.name(),
                result.code
            );
        }

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                datetime: instant,
                message: "non-finite longitude".to_string(),
            });
        }
        Ok(normalize_degrees(longitude))
    }

    /// Longitude of a catalogue body, resolving derived points.
    fn body_longitude(
        &self,
        body: Body,
        jd: f64,
        instant: DateTime<Utc>,
        computed: &BodySet,
    ) -> Result<f64, EphemerisError> {
        match body.source() {
            BodySource::Swiss(code) => self.calc_longitude(body, code, jd, instant),
            BodySource::Offset(base, arc) => {
                let base_lon = match computed.get(base) {
                    Some(lon) => *lon,
                    None => self.body_longitude(base, jd, instant, computed)?,
                };
                Ok(normalize_degrees(base_lon + arc))
            }
        }
    }
}

impl Ephemeris for SwissEphemerisAdapter {
    fn positions_at(
        &self,
        instant: DateTime<Utc>,
        bodies: &[Body],
    ) -> Result<BodySet, EphemerisError> {
        let jd = datetime_to_julian_day(instant);
        let _guard = self.guard();

        let mut positions = BodySet::new();
        for &body in bodies {
            let lon = self.body_longitude(body, jd, instant, &positions)?;
            positions.insert(body, lon);
        }
        log::debug!("computed {} positions for {}", positions.len(), instant);
        Ok(positions)
    }

    fn sidereal_time_at(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        let jd = datetime_to_julian_day(instant);
        let hours = {
            let _guard = self.guard();
            sidtime(jd)
        };
        if !hours.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: "sidereal time".to_string(),
                datetime: instant,
                message: "non-finite sidereal time".to_string(),
            });
        }
        Ok(hours.rem_euclid(24.0))
    }

    fn house_cusps_at(
        &self,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError> {
        let jd = datetime_to_julian_day(instant);
        let _guard = self.guard();

        let (c, a) = houses_ex(jd, self.flags, location.lat, location.lon, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{} cusps undefined at latitude {}", system, location.lat),
            });
        }

        Ok(HousePositions {
            system: system.name().to_string(),
            cusps: HouseCusps::new(cusp_values.map(normalize_degrees)),
            asc: normalize_degrees(ascmc.ascendant),
            mc: normalize_degrees(ascmc.mc),
        })
    }
}

fn default_ephemeris_path() -> PathBuf {
    env::var("SWISS_EPHEMERIS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal = dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + dt.second() as f64 / 3600.0
        + dt.nanosecond() as f64 / 3.6e12;

    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, GREG_CAL)
}
