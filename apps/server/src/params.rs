//! Query-string access in the shape the handlers need.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ApiError;

pub struct Params<'a> {
    raw: &'a HashMap<String, String>,
}

impl<'a> Params<'a> {
    pub fn new(raw: &'a HashMap<String, String>) -> Self {
        Self { raw }
    }

    /// Trimmed, non-empty value of `key`.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.raw
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Parsed value, `None` when absent or unparsable.
    pub fn parse<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// All of `keys`, or a 400 naming every one of them.
    pub fn require<const N: usize>(&self, keys: [&str; N]) -> Result<[&'a str; N], ApiError> {
        let mut values = [""; N];
        for (slot, key) in values.iter_mut().zip(keys.iter()) {
            match self.get(key) {
                Some(v) => *slot = v,
                None => return Err(missing(&keys)),
            }
        }
        Ok(values)
    }

    /// Optional number: absent is fine, present-but-garbage is a 400.
    pub fn optional_number<T: FromStr>(&self, key: &str) -> Result<Option<T>, ApiError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => v
                .parse()
                .map(Some)
                .map_err(|_| ApiError::InvalidInput(format!("{key} must be a number, got {v:?}"))),
        }
    }

    /// Optional finite number; `NaN` and `inf` are rejected like garbage.
    pub fn optional_finite(&self, key: &str) -> Result<Option<f64>, ApiError> {
        match self.optional_number::<f64>(key)? {
            Some(v) if !v.is_finite() => Err(ApiError::InvalidInput(format!(
                "{key} must be a finite number, got {v}"
            ))),
            other => Ok(other),
        }
    }

    /// Required finite number.
    pub fn finite(&self, key: &str) -> Result<f64, ApiError> {
        self.optional_finite(key)?.ok_or_else(|| missing(&[key]))
    }
}

fn missing(keys: &[&str]) -> ApiError {
    ApiError::InvalidInput(format!("Required parameters: {}", keys.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_require_reports_all_keys() {
        let blank_time = raw(&[("date", "2024-01-01"), ("time", " ")]);
        let err = Params::new(&blank_time).require(["date", "time", "tz"]).unwrap_err();
        assert_eq!(err.to_string(), "Required parameters: date, time, tz");

        let complete = raw(&[("date", "2024-01-01"), ("time", "10:00")]);
        let [date, time] = Params::new(&complete).require(["date", "time"]).unwrap();
        assert_eq!((date, time), ("2024-01-01", "10:00"));
    }

    #[test]
    fn test_optional_number() {
        let query = raw(&[("lat", "55.75"), ("lon", "east")]);
        let params = Params::new(&query);
        assert_eq!(params.optional_number::<f64>("lat").unwrap(), Some(55.75));
        assert!(params.optional_number::<f64>("lon").is_err());
        assert_eq!(params.optional_number::<f64>("alt").unwrap(), None);
        assert_eq!(params.parse::<i32>("lat"), None);
    }

    #[test]
    fn test_finite_numbers() {
        let query = raw(&[("lon", "NaN"), ("lat", "inf"), ("alt", "12.5"), ("x", "-infinity")]);
        let params = Params::new(&query);
        assert!(matches!(params.finite("lon"), Err(ApiError::InvalidInput(_))));
        assert!(params.optional_finite("lat").is_err());
        assert!(params.finite("x").is_err());
        assert_eq!(params.finite("alt").unwrap(), 12.5);
        assert_eq!(params.optional_finite("depth").unwrap(), None);
        assert_eq!(params.finite("depth").unwrap_err().to_string(), "Required parameters: depth");
    }
}
