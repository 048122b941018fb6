//! Ephemeris port and its backends.
//!
//! Everything astronomical beyond sidereal time goes through [`Ephemeris`],
//! so aspect and house logic can be exercised without a native backend.

pub mod adapter;
pub mod error;
pub mod fixed;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use error::EphemerisError;
pub use fixed::FixedEphemeris;
pub use types::{EphemerisMode, GeoLocation, HousePositions, HouseSystem};

use crate::bodies::{Body, BodySet};
use chrono::{DateTime, Utc};

pub trait Ephemeris: Send + Sync {
    /// Geocentric ecliptic longitudes of `bodies`, in the given order.
    fn positions_at(
        &self,
        instant: DateTime<Utc>,
        bodies: &[Body],
    ) -> Result<BodySet, EphemerisError>;

    /// Greenwich sidereal time in hours [0, 24).
    fn sidereal_time_at(&self, instant: DateTime<Utc>) -> Result<f64, EphemerisError>;

    fn house_cusps_at(
        &self,
        instant: DateTime<Utc>,
        location: GeoLocation,
        system: HouseSystem,
    ) -> Result<HousePositions, EphemerisError>;
}
