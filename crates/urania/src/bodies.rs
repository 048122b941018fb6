//! Body catalogue and ordered per-body value maps.
//!
//! The catalogue is a fixed table: every body either maps onto a Swiss
//! Ephemeris body number or is derived from another body by a constant arc.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    TrueNode,
    MeanNode,
    /// Mean lunar apogee (Black Moon).
    Lilith,
    /// White Moon, taken as the point opposite Lilith.
    Selena,
}

/// Where a body's longitude comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodySource {
    /// Swiss Ephemeris body number.
    Swiss(i32),
    /// Longitude of another body shifted by a fixed arc in degrees.
    Offset(Body, f64),
}

const CATALOGUE: &[(Body, &str, BodySource)] = &[
    (Body::Sun, "Sun", BodySource::Swiss(0)),
    (Body::Moon, "Moon", BodySource::Swiss(1)),
    (Body::Mercury, "Mercury", BodySource::Swiss(2)),
    (Body::Venus, "Venus", BodySource::Swiss(3)),
    (Body::Mars, "Mars", BodySource::Swiss(4)),
    (Body::Jupiter, "Jupiter", BodySource::Swiss(5)),
    (Body::Saturn, "Saturn", BodySource::Swiss(6)),
    (Body::Uranus, "Uranus", BodySource::Swiss(7)),
    (Body::Neptune, "Neptune", BodySource::Swiss(8)),
    (Body::Pluto, "Pluto", BodySource::Swiss(9)),
    (Body::MeanNode, "Mean Node", BodySource::Swiss(10)),
    (Body::TrueNode, "True Node", BodySource::Swiss(11)),
    (Body::Lilith, "Lilith", BodySource::Swiss(12)), // SE_MEAN_APOG
    (Body::Chiron, "Chiron", BodySource::Swiss(15)),
    (Body::Selena, "Selena", BodySource::Offset(Body::Lilith, 180.0)),
];

/// Bodies reported when no explicit list is configured.
pub const DEFAULT_BODIES: &[Body] = &[
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Saturn,
    Body::Uranus,
    Body::Pluto,
    Body::TrueNode,
    Body::Lilith,
    Body::Selena,
];

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown body: {name}. Valid bodies: {valid:?}")]
pub struct UnknownBody {
    pub name: String,
    pub valid: Vec<&'static str>,
}

impl Body {
    fn entry(self) -> &'static (Body, &'static str, BodySource) {
        // every variant has exactly one catalogue row
        CATALOGUE
            .iter()
            .find(|(body, _, _)| *body == self)
            .unwrap_or(&CATALOGUE[0])
    }

    /// Display name, also used as the JSON key.
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    pub fn source(self) -> BodySource {
        self.entry().2
    }

    /// Every catalogue body, in catalogue order.
    pub fn all() -> impl Iterator<Item = Body> {
        CATALOGUE.iter().map(|(body, _, _)| *body)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = UnknownBody;

    /// Accepts the display name ("True Node") or its snake_case form
    /// ("true_node"), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', " ");
        CATALOGUE
            .iter()
            .find(|(_, name, _)| name.to_lowercase() == wanted)
            .map(|(body, _, _)| *body)
            .ok_or_else(|| UnknownBody {
                name: s.to_string(),
                valid: CATALOGUE.iter().map(|(_, name, _)| *name).collect(),
            })
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Insertion-ordered map keyed by body.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyMap<T> {
    entries: Vec<(Body, T)>,
}

/// Body → ecliptic longitude in degrees.
pub type BodySet = BodyMap<f64>;

impl<T> BodyMap<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert or replace. A replaced body keeps its original position.
    pub fn insert(&mut self, body: Body, value: T) {
        match self.entries.iter_mut().find(|(b, _)| *b == body) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((body, value)),
        }
    }

    pub fn get(&self, body: Body) -> Option<&T> {
        self.entries.iter().find(|(b, _)| *b == body).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Body, &T)> + '_ {
        self.entries.iter().map(|(b, v)| (*b, v))
    }

    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.entries.iter().map(|(b, _)| *b)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn map<U>(&self, mut f: impl FnMut(Body, &T) -> U) -> BodyMap<U> {
        BodyMap {
            entries: self.entries.iter().map(|(b, v)| (*b, f(*b, v))).collect(),
        }
    }
}

impl<T> Default for BodyMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(Body, T)> for BodyMap<T> {
    fn from_iter<I: IntoIterator<Item = (Body, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (body, value) in iter {
            map.insert(body, value);
        }
        map
    }
}

impl<T: Serialize> Serialize for BodyMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (body, value) in &self.entries {
            map.serialize_entry(body.name(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_from_str() {
        assert_eq!("Sun".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!("true_node".parse::<Body>().unwrap(), Body::TrueNode);
        assert_eq!("TRUE NODE".parse::<Body>().unwrap(), Body::TrueNode);
        assert_eq!(" selena ".parse::<Body>().unwrap(), Body::Selena);
        let err = "vulcan".parse::<Body>().unwrap_err();
        assert_eq!(err.name, "vulcan");
        assert!(err.valid.contains(&"Lilith"));
    }

    #[test]
    fn test_every_body_has_a_catalogue_row() {
        let all: Vec<Body> = Body::all().collect();
        assert_eq!(all.len(), 15);
        for body in all {
            assert_eq!(body.name().parse::<Body>().unwrap(), body);
        }
        assert_eq!(Body::Selena.source(), BodySource::Offset(Body::Lilith, 180.0));
        assert_eq!(Body::Lilith.source(), BodySource::Swiss(12));
    }

    #[test]
    fn test_body_map_keeps_insertion_order() {
        let mut set = BodySet::new();
        set.insert(Body::Moon, 100.0);
        set.insert(Body::Sun, 10.0);
        set.insert(Body::Moon, 101.0);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(Body::Moon), Some(&101.0));

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"Moon":101.0,"Sun":10.0}"#);
    }
}
