//! Civil time ↔ UTC and local sidereal time.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use urania::sidereal::{format_hms, local_sidereal_hours};
use urania::time::{localize, parse_date, parse_time, parse_zone, zone_names, LocalInstant};

use crate::error::ApiError;
use crate::params::Params;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct UtcTime {
    pub utc_time: String,
}

#[derive(Debug, Serialize)]
pub struct SiderealTime {
    pub sidereal_time: String,
}

#[derive(Debug, Serialize)]
pub struct CitySiderealTime {
    pub city: String,
    pub timezone: String,
    pub longitude: f64,
    pub sidereal_time: String,
}

fn localize_params(date: &str, time: &str, tz: &str) -> Result<LocalInstant, ApiError> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    let zone = parse_zone(tz)?;
    Ok(localize(date, time, zone)?)
}

/// `GET /api/convert-to-utc?date&time&tz`
pub async fn to_utc(Query(raw): Query<HashMap<String, String>>) -> Result<Json<UtcTime>, ApiError> {
    let [date, time, tz] = Params::new(&raw).require(["date", "time", "tz"])?;
    let local = localize_params(date, time, tz)?;

    Ok(Json(UtcTime {
        utc_time: local.utc.format("%H:%M").to_string(),
    }))
}

/// `GET /api/convert-to-sidereal?date&time&tz&lon`
pub async fn to_sidereal(
    State(state): State<SharedState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<SiderealTime>, ApiError> {
    let params = Params::new(&raw);
    let [date, time, tz, _] = params.require(["date", "time", "tz", "lon"])?;
    let lon = params.finite("lon")?;

    let local = localize_params(date, time, tz)?;
    let lst = local_sidereal_hours(state.ephemeris.as_ref(), &local, lon)?;

    Ok(Json(SiderealTime {
        sidereal_time: format_hms(lst),
    }))
}

/// `GET /api/convert-by-city?city&date&time`
pub async fn by_city(
    State(state): State<SharedState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<CitySiderealTime>, ApiError> {
    let [city, date, time] = Params::new(&raw).require(["city", "date", "time"])?;

    let place = state.geocoder.locate(city).await?;
    if !(place.lat.is_finite() && place.lon.is_finite()) {
        return Err(ApiError::Computation(format!(
            "Geocoder returned unusable coordinates for {city}: {}, {}",
            place.lat, place.lon
        )));
    }
    let zone = state
        .zones
        .timezone_at(place.lat, place.lon)
        .ok_or_else(|| ApiError::NotFound(format!("Time zone not found for {city}")))?;
    log::debug!("{city} resolved to {} ({}, {}) in {}", place.name, place.lat, place.lon, zone.name());

    let local = localize(parse_date(date)?, parse_time(time)?, zone)?;
    let lst = local_sidereal_hours(state.ephemeris.as_ref(), &local, place.lon)?;

    Ok(Json(CitySiderealTime {
        city: city.to_string(),
        timezone: zone.name().to_string(),
        longitude: place.lon,
        sidereal_time: format_hms(lst),
    }))
}

/// `GET /api/timezones`
pub async fn timezones() -> Json<Vec<&'static str>> {
    Json(zone_names())
}
