//! House placement against twelve cusp boundaries.
//!
//! Classification only: cusps come from the ephemeris for whichever house
//! system was requested.

use crate::angles::normalize_degrees;
use crate::bodies::{BodyMap, BodySet};
use serde::{Deserialize, Serialize};

/// Cusps of houses 1..12, in house order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps(pub [f64; 12]);

impl HouseCusps {
    pub fn new(cusps: [f64; 12]) -> Self {
        Self(cusps)
    }

    /// Equal houses of 30° starting at `first`.
    pub fn equal_from(first: f64) -> Self {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = normalize_degrees(first + 30.0 * i as f64);
        }
        Self(cusps)
    }

    /// Cusp of a 1-based house number.
    pub fn cusp(&self, house: u8) -> Option<f64> {
        match house {
            1..=12 => Some(self.0[house as usize - 1]),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// House (1-12) containing `longitude`, or `None` if no interval holds it.
///
/// House `i` spans `[cusp_i, cusp_i+1)` with house 12 closing on cusp 1. An
/// interval whose start is not below its end crosses the 0° seam.
pub fn house_of(cusps: &HouseCusps, longitude: f64) -> Option<u8> {
    let lon = normalize_degrees(longitude);

    for i in 0..12 {
        let start = normalize_degrees(cusps.0[i]);
        let end = normalize_degrees(cusps.0[(i + 1) % 12]);

        let inside = if start < end {
            start <= lon && lon < end
        } else {
            lon >= start || lon < end
        };
        if inside {
            return Some(i as u8 + 1);
        }
    }

    None
}

/// House number of every body in the set.
pub fn place_bodies(cusps: &HouseCusps, bodies: &BodySet) -> BodyMap<Option<u8>> {
    bodies.map(|_, &lon| house_of(cusps, lon))
}
