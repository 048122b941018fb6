//! Local sidereal time from a Greenwich sidereal clock.
//!
//! Greenwich sidereal time itself comes from [`Ephemeris::sidereal_time_at`].

use crate::ephemeris::{Ephemeris, EphemerisError};
use crate::time::LocalInstant;
use chrono::{DateTime, NaiveDate, Utc};

/// Sidereal hours gained per hour of mean solar time, beyond the hour itself.
pub const SIDEREAL_GAIN_PER_HOUR: f64 = 0.002_737_909_35;

/// `Tzv = Tm − N + L/15 + GST − P`, normalized to [0, 24).
///
/// * `local_hours` (Tm): local civil clock time in hours
/// * `utc_offset_hours` (N): zone offset east of Greenwich
/// * `longitude_deg` (L): observer longitude, east positive
/// * `gst_hours` (GST): Greenwich sidereal time at 0h UT of the local date
/// * `correction_hours` (P): subtracted correction, see [`interval_correction`]
pub fn local_sidereal_time(
    local_hours: f64,
    utc_offset_hours: f64,
    longitude_deg: f64,
    gst_hours: f64,
    correction_hours: f64,
) -> f64 {
    let hours = local_hours - utc_offset_hours + longitude_deg / 15.0 + gst_hours - correction_hours;
    let hours = hours.rem_euclid(24.0);
    if hours >= 24.0 {
        0.0
    } else {
        hours
    }
}

/// `P` for an interval of `ut_hours` since 0h UT.
///
/// Negative for positive intervals: subtracting it adds the sidereal gain.
pub fn interval_correction(ut_hours: f64) -> f64 {
    -(ut_hours * SIDEREAL_GAIN_PER_HOUR)
}

/// Local sidereal time in hours for a localized civil time.
pub fn local_sidereal_hours(
    ephemeris: &dyn Ephemeris,
    local: &LocalInstant,
    longitude_deg: f64,
) -> Result<f64, EphemerisError> {
    let gst = ephemeris.sidereal_time_at(midnight_utc(local.date))?;
    let ut_hours = local.local_hours - local.offset_hours;
    Ok(local_sidereal_time(
        local.local_hours,
        local.offset_hours,
        longitude_deg,
        gst,
        interval_correction(ut_hours),
    ))
}

/// 0h UT of a calendar date.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// `HH:MM:SS`, truncated to whole seconds.
pub fn format_hms(hours: f64) -> String {
    let total = (hours.rem_euclid(24.0) * 3600.0).floor() as u32 % 86_400;
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}
