//! Ephemerides, aspects, houses and sidereal time.

pub mod angles;
pub mod aspects;
pub mod bodies;
pub mod chart;
pub mod ephemeris;
pub mod houses;
pub mod sidereal;
pub mod time;

pub use aspects::{find_aspects, AspectCalculator, AspectKind, AspectRecord};
pub use bodies::{Body, BodyMap, BodySet, DEFAULT_BODIES};
pub use chart::{compute_chart, compute_month, Chart, ChartSettings};
pub use ephemeris::{
    Ephemeris, EphemerisError, EphemerisMode, FixedEphemeris, GeoLocation, HousePositions,
    HouseSystem, SwissEphemerisAdapter,
};
pub use houses::{house_of, HouseCusps};
