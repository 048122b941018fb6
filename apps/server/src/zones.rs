//! Coordinates → IANA time zone.

use chrono_tz::Tz;
use tzf_rs::DefaultFinder;
use urania::time::parse_zone;

pub trait TimezoneLookup: Send + Sync {
    fn timezone_at(&self, lat: f64, lon: f64) -> Option<Tz>;
}

/// Offline lookup over the bundled time-zone boundary polygons.
pub struct TzfLookup {
    finder: DefaultFinder,
}

impl TzfLookup {
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }
}

impl Default for TzfLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneLookup for TzfLookup {
    fn timezone_at(&self, lat: f64, lon: f64) -> Option<Tz> {
        let name = self.finder.get_tz_name(lon, lat);
        if name.is_empty() {
            return None;
        }
        parse_zone(name).ok()
    }
}
