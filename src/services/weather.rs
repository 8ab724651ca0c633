//! OpenWeatherMap client producing [`WeatherSnapshot`]s.

use crate::{
    config::StargazerConfig,
    models::{Coordinate, WeatherSnapshot},
    services::resilient_client::{ResilientClient, ResilientClientError, ResilientClientMetrics},
};
use serde::Deserialize;
use tracing::debug;

/// Visibility reported when the provider omits it (or reports zero)
const DEFAULT_VISIBILITY_KM: f64 = 10.0;

/// The subset of the OpenWeatherMap current-weather payload we read
///
/// Every field is optional; the provider drops fields it cannot observe.
#[derive(Debug, Default, Deserialize)]
pub struct OpenWeatherResponse {
    pub clouds: Option<Clouds>,
    /// Metres
    pub visibility: Option<f64>,
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    /// Shift from UTC in seconds
    pub timezone: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Clouds {
    pub all: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MainReadings {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherCondition {
    pub description: Option<String>,
}

/// Current conditions plus the location's UTC offset, when reported
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub snapshot: WeatherSnapshot,
    pub utc_offset_seconds: Option<i32>,
}

impl OpenWeatherResponse {
    /// Substitute defaults for whatever the provider left out
    pub fn into_current_weather(self) -> CurrentWeather {
        let visibility = match self.visibility {
            Some(metres) if metres > 0.0 => metres / 1000.0,
            _ => DEFAULT_VISIBILITY_KM,
        };
        let (temperature, humidity) = self
            .main
            .map(|m| (m.temp.unwrap_or(0.0), m.humidity.unwrap_or(0.0)))
            .unwrap_or((0.0, 0.0));
        let description = self
            .weather
            .into_iter()
            .next()
            .and_then(|w| w.description)
            .unwrap_or_default();

        CurrentWeather {
            snapshot: WeatherSnapshot {
                cloud_cover: self.clouds.and_then(|c| c.all).unwrap_or(0.0),
                visibility,
                temperature,
                humidity,
                description,
            },
            utc_offset_seconds: self.timezone,
        }
    }
}

/// Errors raised while fetching weather data
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("OpenWeatherMap API key not found")]
    MissingApiKey,

    #[error("Invalid weather endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Weather request failed: {0}")]
    Upstream(#[from] ResilientClientError),
}

/// Weather service for the OpenWeatherMap current-weather endpoint
pub struct WeatherService {
    client: ResilientClient,
    api_key: String,
    base_url: String,
}

impl WeatherService {
    /// Build a service; fails fast when no API key is configured
    pub fn new(
        config: &StargazerConfig,
        metrics: Option<ResilientClientMetrics>,
    ) -> Result<Self, WeatherError> {
        let api_key = config
            .openweather_api_key
            .clone()
            .ok_or(WeatherError::MissingApiKey)?;
        let client = ResilientClient::new(config.http_client.clone(), metrics)?;

        Ok(Self {
            client,
            api_key,
            base_url: config.openweather_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Current-weather URL for a coordinate, metric units
    pub fn request_url(&self, coordinate: &Coordinate) -> Result<url::Url, WeatherError> {
        let url = url::Url::parse_with_params(
            &format!("{}/weather", self.base_url),
            &[
                ("lat", coordinate.lat.to_string()),
                ("lon", coordinate.lng.to_string()),
                ("appid", self.api_key.clone()),
                ("units", "metric".to_string()),
            ],
        )?;
        Ok(url)
    }

    /// Fetch current conditions at a coordinate
    pub async fn current(&mut self, coordinate: &Coordinate) -> Result<CurrentWeather, WeatherError> {
        let url = self.request_url(coordinate)?;
        let payload: OpenWeatherResponse = self.client.get_json(url.as_str()).await?;
        let current = payload.into_current_weather();

        debug!(
            lat = coordinate.lat,
            lng = coordinate.lng,
            cloud_cover = current.snapshot.cloud_cover,
            utc_offset_seconds = ?current.utc_offset_seconds,
            "Fetched current weather"
        );

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> StargazerConfig {
        StargazerConfig {
            openweather_api_key: key.map(str::to_string),
            openweather_base_url: "https://weather.test/data/2.5/".to_string(),
            ..StargazerConfig::default()
        }
    }

    #[test]
    fn test_full_payload() {
        let payload: OpenWeatherResponse = serde_json::from_str(
            r#"{
                "clouds": {"all": 20},
                "visibility": 8000,
                "main": {"temp": 12.5, "humidity": 55},
                "weather": [{"description": "few clouds"}, {"description": "mist"}],
                "timezone": -14400
            }"#,
        )
        .unwrap();

        let current = payload.into_current_weather();
        assert_eq!(current.snapshot.cloud_cover, 20.0);
        assert_eq!(current.snapshot.visibility, 8.0);
        assert_eq!(current.snapshot.temperature, 12.5);
        assert_eq!(current.snapshot.humidity, 55.0);
        assert_eq!(current.snapshot.description, "few clouds");
        assert_eq!(current.utc_offset_seconds, Some(-14400));
    }

    #[test]
    fn test_empty_payload_uses_defaults() {
        let payload: OpenWeatherResponse = serde_json::from_str("{}").unwrap();
        let current = payload.into_current_weather();

        assert_eq!(current.snapshot.cloud_cover, 0.0);
        assert_eq!(current.snapshot.visibility, DEFAULT_VISIBILITY_KM);
        assert_eq!(current.snapshot.temperature, 0.0);
        assert_eq!(current.snapshot.humidity, 0.0);
        assert_eq!(current.snapshot.description, "");
        assert_eq!(current.utc_offset_seconds, None);
    }

    #[test]
    fn test_zero_visibility_treated_as_missing() {
        let payload: OpenWeatherResponse =
            serde_json::from_str(r#"{"visibility": 0, "main": {"temp": 3}}"#).unwrap();
        let current = payload.into_current_weather();

        assert_eq!(current.snapshot.visibility, DEFAULT_VISIBILITY_KM);
        assert_eq!(current.snapshot.temperature, 3.0);
        assert_eq!(current.snapshot.humidity, 0.0);
    }

    #[test]
    fn test_missing_api_key() {
        let result = WeatherService::new(&config_with_key(None), None);
        assert!(matches!(result, Err(WeatherError::MissingApiKey)));
    }

    #[test]
    fn test_request_url() {
        let service = WeatherService::new(&config_with_key(Some("k3y")), None).unwrap();
        let coordinate = Coordinate::new(40.5, -74.25).unwrap();
        let url = service.request_url(&coordinate).unwrap();

        assert_eq!(url.path(), "/data/2.5/weather");
        assert_eq!(
            url.query(),
            Some("lat=40.5&lon=-74.25&appid=k3y&units=metric")
        );
    }
}
