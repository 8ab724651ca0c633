//! Domain types shared by the estimator, the evaluator and the aggregator.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Apiv2Schema)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Reasons a latitude/longitude pair cannot become a [`Coordinate`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("Latitude and longitude must be valid numbers")]
    NotANumber,

    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::NotANumber);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::LongitudeOutOfRange);
        }
        Ok(Self { lat, lng })
    }

    pub fn degree_distance(&self, lat: f64, lng: f64) -> f64 {
        degree_distance(self.lat, self.lng, lat, lng)
    }
}

/// Euclidean distance in degree space. Not a geodesic distance.
///
/// Takes raw floats so unvalidated input can be measured too.
pub fn degree_distance(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    (lat_a - lat_b).hypot(lng_a - lng_b)
}

/// Current observed conditions relevant to stargazing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Cloud cover in percent (0-100)
    pub cloud_cover: f64,
    /// Visibility in kilometres
    pub visibility: f64,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent (0-100)
    pub humidity: f64,
    pub description: String,
}

/// Qualitative light-pollution level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
pub enum LightPollutionLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl LightPollutionLevel {
    /// Map a raw pollution score onto a level using fixed breakpoints
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=5 => Self::VeryLow,
            6..=15 => Self::Low,
            16..=30 => Self::Medium,
            31..=45 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    /// Darkness factor in (0, 1]; higher means darker skies
    pub fn factor(&self) -> f64 {
        match self {
            Self::VeryLow => 0.95,
            Self::Low => 0.8,
            Self::Medium => 0.6,
            Self::High => 0.3,
            Self::VeryHigh => 0.1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

/// Light-pollution estimate for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct LightPollutionEstimate {
    pub level: LightPollutionLevel,
    pub description: String,
    pub factor: f64,
    /// Raw pollution score (0-100)
    pub raw_value: u32,
    pub is_good_for_stargazing: bool,
    /// Kind of place the estimate was derived from (e.g. "Polar region")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    /// Set when the simplified fallback estimator produced this value
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

/// Per-factor assessment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Apiv2Schema)]
pub enum FactorLabel {
    Good,
    Poor,
    Unknown,
}

impl From<bool> for FactorLabel {
    fn from(good: bool) -> Self {
        if good { Self::Good } else { Self::Poor }
    }
}

/// Independent labels for each observed factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct FactorLabels {
    pub cloud_cover: FactorLabel,
    pub visibility: FactorLabel,
    pub humidity: FactorLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_pollution: Option<FactorLabel>,
}

/// Outcome of evaluating conditions against one of the threshold rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct StargazingVerdict {
    pub is_good_for_stargazing: bool,
    pub recommendation: String,
    pub factors: FactorLabels,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(40.7128, -74.006).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(CoordinateError::LatitudeOutOfRange)
        );
        assert_eq!(
            Coordinate::new(0.0, -180.1),
            Err(CoordinateError::LongitudeOutOfRange)
        );
        assert_eq!(
            Coordinate::new(f64::NAN, 0.0),
            Err(CoordinateError::NotANumber)
        );
    }

    #[test]
    fn test_degree_distance() {
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        assert!((origin.degree_distance(3.0, 4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_raw_degree_distance_matches_coordinate() {
        let tokyo = Coordinate::new(35.6762, 139.6503).unwrap();
        assert_eq!(
            degree_distance(35.6762, 139.6503, 36.0, 139.0),
            tokyo.degree_distance(36.0, 139.0)
        );
        assert!(degree_distance(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_level_breakpoints() {
        assert_eq!(LightPollutionLevel::from_score(5), LightPollutionLevel::VeryLow);
        assert_eq!(LightPollutionLevel::from_score(6), LightPollutionLevel::Low);
        assert_eq!(LightPollutionLevel::from_score(15), LightPollutionLevel::Low);
        assert_eq!(LightPollutionLevel::from_score(16), LightPollutionLevel::Medium);
        assert_eq!(LightPollutionLevel::from_score(30), LightPollutionLevel::Medium);
        assert_eq!(LightPollutionLevel::from_score(31), LightPollutionLevel::High);
        assert_eq!(LightPollutionLevel::from_score(45), LightPollutionLevel::High);
        assert_eq!(LightPollutionLevel::from_score(46), LightPollutionLevel::VeryHigh);
    }

    #[test]
    fn test_level_serializes_with_spaces() {
        let json = serde_json::to_string(&LightPollutionLevel::VeryLow).unwrap();
        assert_eq!(json, "\"Very Low\"");
        assert_eq!(LightPollutionLevel::VeryHigh.as_str(), "Very High");
    }

    #[test]
    fn test_estimate_omits_primary_only_fields() {
        let estimate = LightPollutionEstimate {
            level: LightPollutionLevel::Low,
            description: "High latitude - minimal light pollution".to_string(),
            factor: 0.8,
            raw_value: 10,
            is_good_for_stargazing: true,
            location_type: None,
            fallback: false,
        };

        let json = serde_json::to_value(&estimate).unwrap();
        assert!(json.get("locationType").is_none());
        assert!(json.get("fallback").is_none());
        assert_eq!(json["rawValue"], 10);
        assert_eq!(json["isGoodForStargazing"], true);
    }
}
