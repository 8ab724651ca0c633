//! Tracing setup and request log fields.

use crate::utils::{extract_client_ip, extract_user_agent};
use regex::Regex;
use std::env;
use std::sync::LazyLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output format for log lines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Logging configuration
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    pub filter: String,
    pub format: LogFormat,
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
            service_name: "stargazer-api".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        let format = match env::var("LOG_FORMAT").map(|v| v.to_lowercase()) {
            Ok(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            filter: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            format,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "stargazer-api".to_string()),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: env::var("APP_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }
}

/// Install the global tracing subscriber
pub fn init_tracing(
    config: &TelemetryConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).try_init()?,
    }

    info!(
        service_name = %config.service_name,
        service_version = %config.service_version,
        environment = %config.environment,
        "Tracing initialized"
    );

    Ok(())
}

/// Fields attached to every request log line
pub struct RequestLogFields {
    pub user_agent: Option<String>,
    pub ip_address: String,
    pub method: String,
    pub path: String,
}

impl RequestLogFields {
    pub fn from_request(req: &actix_web::HttpRequest) -> Self {
        Self {
            user_agent: extract_user_agent(req),
            ip_address: extract_client_ip(req),
            method: req.method().to_string(),
            path: req.path().to_string(),
        }
    }
}

/// Query parameters whose values never reach the logs
static SENSITIVE_QUERY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(?i)([?&]appid=)[^&]*", r"(?i)([?&]api[_-]?key=)[^&]*"]
        .into_iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

/// Redact API keys from a URL before logging it
pub fn redact_api_key(input: &str) -> String {
    SENSITIVE_QUERY_PATTERNS
        .iter()
        .fold(input.to_string(), |result, re| {
            re.replace_all(&result, "${1}[REDACTED]").into_owned()
        })
}
