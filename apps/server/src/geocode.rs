//! City name → coordinates.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use urania_config::GeocoderSettings;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("City not found: {query}")]
    NotFound { query: String },
    #[error("Geocoder request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Geocoder returned an unusable answer: {message}")]
    InvalidResponse { message: String },
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, query: &str) -> Result<Place, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// OpenStreetMap Nominatim search client.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(settings: &GeocoderSettings) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn locate(&self, query: &str) -> Result<Place, GeocodeError> {
        log::debug!("geocoding {:?}", query);
        let places: Vec<NominatimPlace> = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let place = places.into_iter().next().ok_or_else(|| GeocodeError::NotFound {
            query: query.to_string(),
        })?;
        parse_place(place)
    }
}

fn parse_place(place: NominatimPlace) -> Result<Place, GeocodeError> {
    let coord = |value: &str, what: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| GeocodeError::InvalidResponse {
                message: format!("{what} {value:?} is not a number"),
            })
    };
    Ok(Place {
        lat: coord(&place.lat, "latitude")?,
        lon: coord(&place.lon, "longitude")?,
        name: place.display_name,
    })
}
