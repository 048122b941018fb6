use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use urania::ephemeris::EphemerisError;
use urania::time::TimeError;

use crate::geocode::GeocodeError;

/// Every failure a request can end in. The message goes back as `{"error": ...}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed required parameter
    #[error("{0}")]
    InvalidInput(String),
    /// Unknown city or time zone
    #[error("{0}")]
    NotFound(String),
    /// Anything else that went wrong while computing
    #[error("{0}")]
    Computation(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        } else {
            log::debug!("request rejected ({}): {}", status, self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<EphemerisError> for ApiError {
    fn from(e: EphemerisError) -> Self {
        match e {
            EphemerisError::InvalidLocation { .. } | EphemerisError::InvalidHouseSystem { .. } => {
                ApiError::InvalidInput(e.to_string())
            }
            _ => ApiError::Computation(e.to_string()),
        }
    }
}

impl From<TimeError> for ApiError {
    fn from(e: TimeError) -> Self {
        match e {
            TimeError::UnknownZone { .. } => ApiError::NotFound(e.to_string()),
            _ => ApiError::Computation(e.to_string()),
        }
    }
}

impl From<GeocodeError> for ApiError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            _ => ApiError::Computation(e.to_string()),
        }
    }
}
