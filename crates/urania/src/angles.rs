//! Small helpers for ecliptic angles.

/// Reduce a longitude to [0, 360).
pub fn normalize_degrees(longitude: f64) -> f64 {
    let reduced = longitude.rem_euclid(360.0);
    // rem_euclid can land exactly on 360.0 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Shortest arc between two longitudes, in [0, 180].
pub fn separation(lon1: f64, lon2: f64) -> f64 {
    let diff = normalize_degrees(lon1 - lon2);
    if diff <= 180.0 {
        diff
    } else {
        360.0 - diff
    }
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
