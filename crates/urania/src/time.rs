//! Civil time parsing and IANA zone localization.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("Invalid time '{input}', expected HH:MM or HH:MM:SS")]
    InvalidTime { input: String },
    #[error("Unknown time zone: {name}")]
    UnknownZone { name: String },
    #[error("Local time {date} {time} does not exist in {zone}")]
    NonexistentLocalTime {
        date: NaiveDate,
        time: NaiveTime,
        zone: String,
    },
}

/// A civil time pinned to its zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalInstant {
    pub utc: DateTime<Utc>,
    /// Local calendar date
    pub date: NaiveDate,
    /// Local clock time in hours
    pub local_hours: f64,
    /// Zone offset east of Greenwich, hours
    pub offset_hours: f64,
}

pub fn parse_date(input: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| TimeError::InvalidDate {
        input: input.to_string(),
    })
}

pub fn parse_time(input: &str) -> Result<NaiveTime, TimeError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| TimeError::InvalidTime {
            input: input.to_string(),
        })
}

pub fn parse_zone(name: &str) -> Result<Tz, TimeError> {
    name.trim().parse::<Tz>().map_err(|_| TimeError::UnknownZone {
        name: name.to_string(),
    })
}

/// Clock time as fractional hours.
pub fn hours_of_day(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / 3600.0
        + f64::from(time.nanosecond()) / 3.6e12
}

/// Pin a local date and time to a zone.
///
/// A repeated hour (DST fall-back) resolves to the earlier instant; a skipped
/// hour (DST spring-forward) is an error.
pub fn localize(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<LocalInstant, TimeError> {
    let local = match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(TimeError::NonexistentLocalTime {
                date,
                time,
                zone: tz.name().to_string(),
            })
        }
    };
    let offset_seconds = local.offset().fix().local_minus_utc();

    Ok(LocalInstant {
        utc: local.with_timezone(&Utc),
        date,
        local_hours: hours_of_day(time),
        offset_hours: f64::from(offset_seconds) / 3600.0,
    })
}

/// Every IANA zone name known to the zone database.
pub fn zone_names() -> Vec<&'static str> {
    chrono_tz::TZ_VARIANTS.iter().map(|tz| tz.name()).collect()
}
