//! Google Maps JSON response types
//!
//! Deserialisation targets for the Geocoding and Distance Matrix APIs, plus
//! the conversion of a decoded body into the provider contract.
//!
//! See: <https://developers.google.com/maps/documentation/geocoding/requests-geocoding>
//! and <https://developers.google.com/maps/documentation/distance-matrix/distance-matrix>

use serde::Deserialize;

use crate::error::{ProviderError, Result};
use crate::models::{Coordinates, LegMeasurement};

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

// == Geocoding ==

/// Geocoding API response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// `OK`, `ZERO_RESULTS`, or an error status such as `REQUEST_DENIED`
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResponse {
    /// `OK` yields the first result's location, `ZERO_RESULTS` yields `None`,
    /// anything else is a provider error carrying its message verbatim.
    pub fn into_outcome(self) -> Result<Option<Coordinates>> {
        match self.status.as_str() {
            STATUS_OK => {
                let first = self.results.into_iter().next().ok_or_else(|| {
                    ProviderError::Parse("geocode status OK without results".to_string())
                })?;
                let LatLng { lat, lng } = first.geometry.location;
                Coordinates::new(lat, lng).map(Some).ok_or_else(|| {
                    ProviderError::Parse(format!("geocode location out of range: {lat},{lng}"))
                })
            }
            STATUS_ZERO_RESULTS => Ok(None),
            _ => Err(ProviderError::Status {
                message: self
                    .error_message
                    .unwrap_or_else(|| "no error message supplied".to_string()),
                status: self.status,
            }),
        }
    }
}

// == Distance Matrix ==

/// Distance Matrix API response for a single origin and destination.
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    pub distance: Option<ValueField>,
    pub duration: Option<ValueField>,
    pub duration_in_traffic: Option<ValueField>,
}

/// `{ "value": <number>, "text": "..." }` measurement.
#[derive(Debug, Deserialize)]
pub struct ValueField {
    pub value: f64,
}

impl DistanceMatrixResponse {
    /// Requires top-level `OK`, element `OK` and both distance and duration.
    /// The traffic duration is carried along when present.
    pub fn into_measurement(self) -> Result<LegMeasurement> {
        if self.status != STATUS_OK {
            return Err(ProviderError::Status {
                message: self
                    .error_message
                    .unwrap_or_else(|| "no error message supplied".to_string()),
                status: self.status,
            });
        }

        let element = self
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| ProviderError::Parse("distance matrix has no elements".to_string()))?;

        if element.status != STATUS_OK {
            return Err(ProviderError::ElementStatus(element.status));
        }

        match (element.distance, element.duration) {
            (Some(distance), Some(duration)) => Ok(LegMeasurement {
                distance_meters: distance.value,
                duration_seconds: duration.value,
                duration_in_traffic_seconds: element.duration_in_traffic.map(|d| d.value),
            }),
            _ => Err(ProviderError::Parse(
                "route element missing distance or duration".to_string(),
            )),
        }
    }
}
