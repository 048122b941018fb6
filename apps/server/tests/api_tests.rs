use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body as HttpBody};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use tower::ServiceExt;
use urania::bodies::{Body, BodySet, DEFAULT_BODIES};
use urania::chart::ChartSettings;
use urania::ephemeris::{Ephemeris, FixedEphemeris};
use urania::sidereal::format_hms;
use urania_server::geocode::{GeocodeError, Geocoder, Place};
use urania_server::zones::TimezoneLookup;
use urania_server::{router, AppState};

struct KnownCities(HashMap<&'static str, Place>);

#[async_trait]
impl Geocoder for KnownCities {
    async fn locate(&self, query: &str) -> Result<Place, GeocodeError> {
        self.0
            .get(query)
            .cloned()
            .ok_or_else(|| GeocodeError::NotFound { query: query.to_string() })
    }
}

/// Everything east of Greenwich is Moscow, everything else has no zone.
struct CrudeZones;

impl TimezoneLookup for CrudeZones {
    fn timezone_at(&self, _lat: f64, lon: f64) -> Option<Tz> {
        (lon > 0.0).then_some(chrono_tz::Europe::Moscow)
    }
}

fn positions() -> BodySet {
    let mut set: BodySet = DEFAULT_BODIES
        .iter()
        .enumerate()
        .map(|(i, &body)| (body, 3.0 + 47.0 * i as f64))
        .collect();
    set.insert(Body::Sun, 10.0);
    set.insert(Body::Moon, 100.0);
    set
}

fn ephemeris() -> FixedEphemeris {
    FixedEphemeris::new(positions()).with_angles(5.0, 275.0)
}

fn app() -> Router {
    let cities = HashMap::from([
        (
            "Moscow",
            Place { name: "Moscow, Russia".into(), lat: 55.7558, lon: 37.6173 },
        ),
        (
            "Null Island",
            Place { name: "Null Island".into(), lat: 0.0, lon: -0.0001 },
        ),
        (
            "Nowhere",
            Place { name: "Nowhere".into(), lat: 10.0, lon: f64::NAN },
        ),
    ]);
    let state = AppState {
        ephemeris: Arc::new(ephemeris()),
        geocoder: Arc::new(KnownCities(cities)),
        zones: Arc::new(CrudeZones),
        chart: ChartSettings::default(),
    };
    router(Arc::new(state))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(HttpBody::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_ephemerides_basic_shape() {
    let (status, body) = get("/ephemerides?year=2024&month=1&day=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-01-01");

    let keys: Vec<&str> = body["positions"].as_object().unwrap().keys().map(|k| k.as_str()).collect();
    let mut expected: Vec<&str> = DEFAULT_BODIES.iter().map(|b| b.name()).collect();
    let mut sorted_keys = keys.clone();
    sorted_keys.sort();
    expected.sort();
    assert_eq!(sorted_keys, expected);

    assert!(body["sidereal_time"].as_f64().is_some());
    assert!(body.get("asc").is_none());
    assert!(body.get("planet_houses").is_none());

    let square = body["aspects"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["between"] == serde_json::json!(["Sun", "Moon"]))
        .unwrap();
    assert_eq!(square["aspect"], "Square");
    assert_eq!(square["angle"], 90.0);
}

#[tokio::test]
async fn test_ephemerides_with_location_reports_houses() {
    let (status, body) =
        get("/ephemerides?year=2024&month=1&day=1&time=12:30:00&lat=55.75&lon=37.62").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["asc"], 5.0);
    assert_eq!(body["mc"], 275.0);
    assert_eq!(body["planet_houses"]["Sun"], 1);
    assert_eq!(body["planet_houses"]["Moon"], 4);
    assert_eq!(body["planet_houses"].as_object().unwrap().len(), DEFAULT_BODIES.len());
}

#[tokio::test]
async fn test_ephemerides_rejects_bad_input() {
    for uri in [
        "/ephemerides?year=2024&month=1",
        "/ephemerides?year=2024&month=jan&day=1",
        "/ephemerides?year=2024&month=2&day=30",
        "/ephemerides?year=2024&month=1&day=1&time=noon",
        "/ephemerides?year=2024&month=1&day=1&lat=55.0",
        "/ephemerides?year=2024&month=1&day=1&lat=95.0&lon=10.0",
        "/ephemerides?year=2024&month=1&day=1&lat=NaN&lon=10.0",
        "/ephemerides?year=2024&month=1&day=1&lat=10.0&lon=inf",
        "/ephemerides?year=2024&month=1&day=1&lat=10.0&lon=10.0&hsys=bogus",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_month_variant_lists_every_day() {
    let (status, body) = get("/ephemeris?year=2024&month=2").await;
    assert_eq!(status, StatusCode::OK);
    let days = body.as_array().unwrap();
    assert_eq!(days.len(), 29);
    assert_eq!(days[0]["date"], "2024-02-01");
    assert_eq!(days[28]["date"], "2024-02-29");

    let (status, _) = get("/ephemeris?year=2024&month=13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_to_utc() {
    let (status, body) = get("/api/convert-to-utc?date=2024-01-01&time=03:30&tz=Europe/Moscow").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "utc_time": "00:30" }));

    let (status, _) = get("/api/convert-to-utc?date=2024-01-01&time=03:30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get("/api/convert-to-utc?date=2024-01-01&time=03:30&tz=Mars/Olympus").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get("/api/convert-to-utc?date=01.01.2024&time=03:30&tz=UTC").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("01.01.2024"));
}

#[tokio::test]
async fn test_convert_to_sidereal_at_greenwich_midnight_is_gst() {
    let (status, body) =
        get("/api/convert-to-sidereal?date=2024-01-01&time=00:00&tz=UTC&lon=0").await;
    assert_eq!(status, StatusCode::OK);

    let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let gst = ephemeris().sidereal_time_at(midnight).unwrap();
    assert_eq!(body["sidereal_time"], format_hms(gst));
}

#[tokio::test]
async fn test_convert_to_sidereal_rejects_bad_longitude() {
    let (status, _) = get("/api/convert-to-sidereal?date=2024-01-01&time=00:00&tz=UTC&lon=east").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get("/api/convert-to-sidereal?date=2024-01-01&time=00:00&tz=UTC").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    for lon in ["NaN", "inf", "-infinity"] {
        let uri = format!("/api/convert-to-sidereal?date=2024-01-01&time=00:00&tz=UTC&lon={lon}");
        let (status, body) = get(&uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{lon}");
        assert!(body["error"].as_str().unwrap().contains("finite"), "{lon}");
    }
}

#[tokio::test]
async fn test_convert_by_city() {
    let (status, body) = get("/api/convert-by-city?city=Moscow&date=2024-01-01&time=03:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Moscow");
    assert_eq!(body["timezone"], "Europe/Moscow");
    assert_eq!(body["longitude"], 37.6173);

    // 03:00 in Moscow is Greenwich midnight
    let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let gst = ephemeris().sidereal_time_at(midnight).unwrap();
    let expected = format_hms(gst + 37.6173 / 15.0);
    assert_eq!(body["sidereal_time"], expected);
}

#[tokio::test]
async fn test_convert_by_city_lookup_failures() {
    let (status, body) = get("/api/convert-by-city?city=Atlantis&date=2024-01-01&time=03:00").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "City not found: Atlantis");

    let (status, _) = get("/api/convert-by-city?city=Null%20Island&date=2024-01-01&time=03:00").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get("/api/convert-by-city?city=Moscow&date=2024-01-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get("/api/convert-by-city?city=Nowhere&date=2024-01-01&time=03:00").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["sidereal_time"].is_null());
}

#[tokio::test]
async fn test_timezones_lists_iana_names() {
    let (status, body) = get("/api/timezones").await;
    assert_eq!(status, StatusCode::OK);
    let names = body.as_array().unwrap();
    assert!(names.iter().any(|n| n == "Europe/Moscow"));
    assert!(names.iter().any(|n| n == "UTC"));
}

#[tokio::test]
async fn test_time_converter_page() {
    let response = app()
        .oneshot(Request::builder().uri("/time-converter").body(HttpBody::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("/api/convert-to-sidereal"));
}
