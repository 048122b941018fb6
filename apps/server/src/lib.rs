//! HTTP surface for urania: charts, aspects, houses and time conversion.

pub mod error;
pub mod geocode;
pub mod params;
pub mod routes;
pub mod state;
pub mod zones;

pub use error::ApiError;
pub use routes::router;
pub use state::{chart_settings, AppState, SharedState};
