use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::SharedState;

pub mod convert;
pub mod ephemerides;
pub mod pages;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/ephemerides", get(ephemerides::ephemerides))
        .route("/ephemeris", get(ephemerides::month))
        .route("/api/convert-to-utc", get(convert::to_utc))
        .route("/api/convert-to-sidereal", get(convert::to_sidereal))
        .route("/api/convert-by-city", get(convert::by_city))
        .route("/api/timezones", get(convert::timezones))
        .route("/time-converter", get(pages::time_converter))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
