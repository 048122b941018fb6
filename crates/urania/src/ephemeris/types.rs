use crate::ephemeris::error::EphemerisError;
use crate::houses::HouseCusps;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic location coordinates, east longitude positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// Build a location, rejecting out-of-range or non-finite coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, EphemerisError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(EphemerisError::InvalidLocation { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

/// House system mapping to Swiss Ephemeris letters
const HOUSE_SYSTEMS: &[(HouseSystem, &str, u8)] = &[
    (HouseSystem::Placidus, "placidus", b'P'),
    (HouseSystem::Koch, "koch", b'K'),
    (HouseSystem::Equal, "equal", b'E'),
    (HouseSystem::WholeSign, "whole_sign", b'W'),
    (HouseSystem::Regiomontanus, "regiomontanus", b'R'),
    (HouseSystem::Campanus, "campanus", b'C'),
    (HouseSystem::Alcabitius, "alcabitius", b'A'),
    (HouseSystem::Morinus, "morinus", b'M'),
    (HouseSystem::Porphyry, "porphyry", b'O'),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
    Porphyry,
}

impl HouseSystem {
    fn entry(self) -> &'static (HouseSystem, &'static str, u8) {
        HOUSE_SYSTEMS
            .iter()
            .find(|(system, _, _)| *system == self)
            .unwrap_or(&HOUSE_SYSTEMS[0])
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Single-letter code understood by `swe_houses_ex`
    pub fn code(self) -> u8 {
        self.entry().2
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(_, name, code)| *name == wanted || wanted == (*code as char).to_lowercase().to_string())
            .map(|(system, _, _)| *system)
            .ok_or_else(|| EphemerisError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(_, name, _)| name.to_string()).collect(),
            })
    }
}

/// House cusps and angles at one instant and place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePositions {
    /// House system name
    pub system: String,
    pub cusps: HouseCusps,
    /// Ascendant longitude in degrees
    pub asc: f64,
    /// Midheaven longitude in degrees
    pub mc: f64,
}

/// Which Swiss Ephemeris backend evaluates positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EphemerisMode {
    /// Built-in analytic theory, no data files
    #[default]
    Moshier,
    /// Swiss Ephemeris data files
    Swiss,
}

impl FromStr for EphemerisMode {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "moshier" => Ok(EphemerisMode::Moshier),
            "swiss" | "swisseph" => Ok(EphemerisMode::Swiss),
            _ => Err(EphemerisError::InvalidMode { mode: s.to_string() }),
        }
    }
}
