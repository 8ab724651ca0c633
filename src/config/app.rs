//! Upstream provider configuration.

use crate::services::{resilient_client::ResilientClientConfig, timezone::NightWindow};
use std::env;

pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_ISS_API_URL: &str = "http://api.open-notify.org/iss-now.json";

/// Configuration injected into every handler that talks to an upstream
#[derive(Clone, Debug)]
pub struct StargazerConfig {
    /// OpenWeatherMap API key; `/api/weather` refuses to run without it
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub iss_api_url: String,
    pub night_window: NightWindow,
    pub http_client: ResilientClientConfig,
}

impl Default for StargazerConfig {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            openweather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            iss_api_url: DEFAULT_ISS_API_URL.to_string(),
            night_window: NightWindow::default(),
            http_client: ResilientClientConfig::default(),
        }
    }
}

impl StargazerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let openweather_api_key = env::var("OPENWEATHER_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let openweather_base_url = env::var("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_OPENWEATHER_BASE_URL.to_string());

        let iss_api_url =
            env::var("ISS_API_URL").unwrap_or_else(|_| DEFAULT_ISS_API_URL.to_string());

        let defaults = NightWindow::default();
        let night_window = NightWindow {
            start_hour: env::var("NIGHT_START_HOUR")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|h| *h < 24)
                .unwrap_or(defaults.start_hour),
            end_hour: env::var("NIGHT_END_HOUR")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|h| *h < 24)
                .unwrap_or(defaults.end_hour),
        };

        Self {
            openweather_api_key,
            openweather_base_url,
            iss_api_url,
            night_window,
            http_client: ResilientClientConfig::from_env(),
        }
    }
}
