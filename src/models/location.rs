//! Location value types
//!
//! [`Coordinates`] can only be built through a validating constructor, so a
//! value in hand is always finite and inside the WGS84 ranges.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

// == Coordinates ==
/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Builds a coordinate pair, returning `None` when either component is
    /// non-finite or outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    // == Cache Key ==
    /// Fixed six-decimal representation (about 0.11 m) used to key the
    /// distance cache, so near-identical repeats share an entry.
    pub fn cache_key(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

// == Landmark ==
/// A stored point the target is measured against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    pub location: Coordinates,
}

impl Landmark {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }
}

// == Travel Mode ==
/// Travel mode forwarded to the distance provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    /// Wire name understood by the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a travel mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown travel mode '{0}' (expected driving, walking, bicycling or transit)")]
pub struct ParseTravelModeError(pub String);

impl FromStr for TravelMode {
    type Err = ParseTravelModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            _ => Err(ParseTravelModeError(s.to_string())),
        }
    }
}
