//! Daily and monthly charts.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use urania::chart::{compute_chart, compute_month, Chart};
use urania::ephemeris::{GeoLocation, HouseSystem};
use urania::time::parse_time;

use crate::error::ApiError;
use crate::params::Params;
use crate::state::SharedState;

/// `GET /ephemerides?year&month&day[&time][&lat&lon][&hsys]`
pub async fn ephemerides(
    State(state): State<SharedState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<Chart>, ApiError> {
    let params = Params::new(&raw);

    let (year, month, day) = match (
        params.parse::<i32>("year"),
        params.parse::<u32>("month"),
        params.parse::<u32>("day"),
    ) {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => {
            return Err(ApiError::InvalidInput(
                "year, month and day must be given as integers".to_string(),
            ))
        }
    };
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ApiError::InvalidInput(format!("{year:04}-{month:02}-{day:02} is not a calendar date"))
    })?;

    let time = params
        .get("time")
        .map(parse_time)
        .transpose()
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;

    let location = match (params.optional_finite("lat")?, params.optional_finite("lon")?) {
        (Some(lat), Some(lon)) => Some(GeoLocation::new(lat, lon)?),
        (None, None) => None,
        _ => {
            return Err(ApiError::InvalidInput(
                "lat and lon must be given together".to_string(),
            ))
        }
    };

    let house_system = params
        .get("hsys")
        .map(str::parse::<HouseSystem>)
        .transpose()?;

    log::debug!("chart for {date} time={time:?} location={location:?}");
    let chart = compute_chart(
        state.ephemeris.as_ref(),
        &state.chart,
        date,
        time,
        location,
        house_system,
    )?;
    Ok(Json(chart))
}

/// `GET /ephemeris?year&month`: one midnight chart per day.
pub async fn month(
    State(state): State<SharedState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Chart>>, ApiError> {
    let params = Params::new(&raw);

    let (year, month) = match (params.parse::<i32>("year"), params.parse::<u32>("month")) {
        (Some(y), Some(m)) if (1..=12).contains(&m) => (y, m),
        _ => {
            return Err(ApiError::InvalidInput(
                "year and month (1-12) must be given as integers".to_string(),
            ))
        }
    };
    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(ApiError::InvalidInput(format!("year {year} is out of range")));
    }

    log::debug!("month of charts for {year:04}-{month:02}");
    let charts = compute_month(state.ephemeris.as_ref(), &state.chart, year, month)?;
    Ok(Json(charts))
}
