//! API request and response models for the HTTP endpoints.

use crate::{
    error::ApiError,
    models::stargazing::{
        Coordinate, FactorLabels, LightPollutionEstimate, WeatherSnapshot,
    },
};
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub version: String,
    pub commit: String,
    pub build_time: String,
}

/// Body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query parameters shared by every location-based endpoint
///
/// Both values arrive as raw strings so a missing parameter and a malformed
/// one can be told apart.
#[derive(Clone, Default, Serialize, Deserialize, Apiv2Schema)]
pub struct CoordinateQuery {
    /// Latitude in decimal degrees
    pub lat: Option<String>,
    /// Longitude in decimal degrees
    pub lng: Option<String>,
}

impl CoordinateQuery {
    /// Both parameters, provided they are present and non-empty
    pub fn require(&self) -> Result<(&str, &str), ApiError> {
        match (self.lat.as_deref(), self.lng.as_deref()) {
            (Some(lat), Some(lng)) if !lat.trim().is_empty() && !lng.trim().is_empty() => {
                Ok((lat.trim(), lng.trim()))
            }
            _ => Err(ApiError::MissingCoordinates),
        }
    }

    /// Parse and validate the query into a [`Coordinate`]
    pub fn coordinate(&self) -> Result<Coordinate, ApiError> {
        let (lat, lng) = self.require()?;
        let lat = lat.parse::<f64>().map_err(|_| {
            ApiError::InvalidCoordinates("Latitude and longitude must be valid numbers".into())
        })?;
        let lng = lng.parse::<f64>().map_err(|_| {
            ApiError::InvalidCoordinates("Latitude and longitude must be valid numbers".into())
        })?;
        Coordinate::new(lat, lng).map_err(|e| ApiError::InvalidCoordinates(e.to_string()))
    }

    /// Best-effort numeric values; anything unparsable becomes NaN
    pub fn lossy_values(&self) -> (f64, f64) {
        let parse = |value: Option<&str>| {
            value
                .and_then(|v| v.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN)
        };
        (parse(self.lat.as_deref()), parse(self.lng.as_deref()))
    }
}

/// Response model for the weather proxy endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResponse {
    pub cloud_cover: f64,
    pub visibility: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub description: String,
    /// Quick-check verdict (no night or light-pollution consideration)
    pub is_good_for_stargazing: bool,
}

impl WeatherResponse {
    pub fn new(snapshot: WeatherSnapshot, is_good_for_stargazing: bool) -> Self {
        Self {
            cloud_cover: snapshot.cloud_cover,
            visibility: snapshot.visibility,
            temperature: snapshot.temperature,
            humidity: snapshot.humidity,
            description: snapshot.description,
            is_good_for_stargazing,
        }
    }
}

/// Current ISS position as reported by Open Notify
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct IssPosition {
    pub message: String,
    pub timestamp: i64,
    pub iss_position: IssCoordinates,
}

/// Open Notify reports coordinates as decimal strings
#[derive(Debug, Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct IssCoordinates {
    pub latitude: String,
    pub longitude: String,
}

/// Response model for the simulated stargazing-possibility endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct PossibilityResponse {
    pub is_good_for_stargazing: bool,
    pub recommendation: String,
    pub weather_data: WeatherSnapshot,
    pub factors: FactorLabels,
}

/// Response model for the timezone endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneResponse {
    /// UTC offset in hours
    pub offset: f64,
    /// Local wall-clock time, e.g. "04:52 AM"
    pub local_time_string: String,
    pub is_night_time: bool,
    /// Where the offset came from: "provider" or "longitude"
    pub source: String,
}

/// Local time details attached to a stargazing report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct TimeInfo {
    pub current_time: String,
    pub is_night_time: bool,
    pub utc_offset_hours: f64,
    pub source: String,
    /// Start of the configured night window, e.g. "08:00 PM"
    pub next_sunset: String,
}

/// Full stargazing assessment for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Apiv2Schema)]
#[serde(rename_all = "camelCase")]
pub struct StargazingReport {
    pub location: Coordinate,
    pub is_good_for_stargazing: bool,
    pub recommendation: String,
    /// Absent when the weather provider could not be reached
    pub weather_data: Option<WeatherSnapshot>,
    pub factors: FactorLabels,
    pub light_pollution: LightPollutionEstimate,
    pub time_info: TimeInfo,
}
