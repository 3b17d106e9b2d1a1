//! Travel leg metrics and per-landmark matrix rows

use serde::Serialize;

/// Rounds to one decimal place.
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// == Leg Measurement ==
/// Raw metrics for one directed leg as reported by a distance provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegMeasurement {
    /// Route length in meters
    pub distance_meters: f64,
    /// Baseline duration for the mode, in seconds
    pub duration_seconds: f64,
    /// Live-traffic duration, when the provider supplied one
    pub duration_in_traffic_seconds: Option<f64>,
}

impl LegMeasurement {
    /// Traffic-aware duration when present, otherwise the baseline.
    pub fn effective_duration_seconds(&self) -> f64 {
        self.duration_in_traffic_seconds
            .unwrap_or(self.duration_seconds)
    }
}

// == Distance Point ==
/// Traffic-aware distance and duration for one directed leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistancePoint {
    pub distance_km: f64,
    pub duration_minutes: f64,
}

impl DistancePoint {
    /// Converts meters to kilometers and seconds to minutes, each rounded to
    /// one decimal place. Negative inputs are clamped to zero.
    pub fn from_measurement(measurement: &LegMeasurement) -> Self {
        Self {
            distance_km: round_tenth(measurement.distance_meters.max(0.0) / 1000.0),
            duration_minutes: round_tenth(measurement.effective_duration_seconds().max(0.0) / 60.0),
        }
    }
}

// == Travel Leg Result ==
/// Matrix row for a single landmark. Either leg may be missing on its own;
/// every missing leg contributes a cause to `error_message`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelLegResult {
    pub landmark_id: String,
    pub landmark_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_landmark: Option<DistancePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_target: Option<DistancePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TravelLegResult {
    /// True when both directions produced metrics.
    pub fn is_complete(&self) -> bool {
        self.to_landmark.is_some() && self.to_target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_point_rounding() {
        let measurement = LegMeasurement {
            distance_meters: 12345.0,
            duration_seconds: 725.0,
            duration_in_traffic_seconds: None,
        };
        let point = DistancePoint::from_measurement(&measurement);
        assert_eq!(point.distance_km, 12.3);
        assert_eq!(point.duration_minutes, 12.1);
    }

    #[test]
    fn test_traffic_duration_preferred() {
        let measurement = LegMeasurement {
            distance_meters: 1000.0,
            duration_seconds: 600.0,
            duration_in_traffic_seconds: Some(900.0),
        };
        let point = DistancePoint::from_measurement(&measurement);
        assert_eq!(point.duration_minutes, 15.0);
        assert_eq!(point.distance_km, 1.0);
    }

    #[test]
    fn test_row_serializes_camel_case_and_skips_absent_legs() {
        let row = TravelLegResult {
            landmark_id: "1".to_string(),
            landmark_name: "Office".to_string(),
            to_landmark: None,
            to_target: Some(DistancePoint {
                distance_km: 3.2,
                duration_minutes: 9.5,
            }),
            error_message: Some("target -> landmark: boom".to_string()),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"landmarkName\":\"Office\""));
        assert!(json.contains("\"toTarget\""));
        assert!(!json.contains("toLandmark"));
        assert!(!row.is_complete());
    }
}
