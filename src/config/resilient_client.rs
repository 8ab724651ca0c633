//! Configuration for resilient HTTP client
//!
//! Provides environment-based configuration for the upstream HTTP client.
//! Retries are off unless `RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS` is set.
//!
//! Handlers build a fresh client per request and make one call with it, so
//! circuit breaker state never outlives a request. Breaker thresholds are
//! therefore not read from the environment and stay at their defaults.

use crate::services::resilient_client::{ResilientClientConfig, RetryConfig};
use std::env;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ResilientClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            request_timeout_seconds: env_or(
                "RESILIENT_CLIENT_REQUEST_TIMEOUT",
                defaults.request_timeout_seconds,
            ),
            connect_timeout_seconds: env_or(
                "RESILIENT_CLIENT_CONNECT_TIMEOUT",
                defaults.connect_timeout_seconds,
            ),
            retry: RetryConfig::from_env(),
            circuit_breaker: defaults.circuit_breaker,
            enable_detailed_logging: env_or(
                "RESILIENT_CLIENT_DETAILED_LOGGING",
                defaults.enable_detailed_logging,
            ),
        }
    }
}

impl RetryConfig {
    /// Load retry configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        // Comma-separated status codes, e.g. "500,502,503"
        let retry_on_status = env::var("RESILIENT_CLIENT_RETRY_ON_STATUS")
            .ok()
            .map(|v| {
                v.split(',')
                    .filter_map(|s| s.trim().parse::<u16>().ok())
                    .collect()
            })
            .unwrap_or(defaults.retry_on_status);

        Self {
            max_attempts: env_or("RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS", defaults.max_attempts),
            initial_delay_ms: env_or(
                "RESILIENT_CLIENT_RETRY_INITIAL_DELAY_MS",
                defaults.initial_delay_ms,
            ),
            max_delay_ms: env_or("RESILIENT_CLIENT_RETRY_MAX_DELAY_MS", defaults.max_delay_ms),
            retry_on_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    const KEYS: &[&str] = &[
        "RESILIENT_CLIENT_REQUEST_TIMEOUT",
        "RESILIENT_CLIENT_CONNECT_TIMEOUT",
        "RESILIENT_CLIENT_DETAILED_LOGGING",
        "RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS",
        "RESILIENT_CLIENT_RETRY_INITIAL_DELAY_MS",
        "RESILIENT_CLIENT_RETRY_MAX_DELAY_MS",
        "RESILIENT_CLIENT_RETRY_ON_STATUS",
        "RESILIENT_CLIENT_CB_FAILURE_THRESHOLD",
    ];

    fn clear() {
        for key in KEYS {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_resilient_client_config_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear();

        let config = ResilientClientConfig::from_env();
        assert_eq!(config.request_timeout_seconds, 5);
        assert_eq!(config.connect_timeout_seconds, 3);
        assert!(config.enable_detailed_logging);
        assert_eq!(config.retry.max_attempts, 0);
        assert_eq!(config.circuit_breaker.failure_threshold, 5);
    }

    #[test]
    fn test_resilient_client_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear();

        unsafe {
            env::set_var("RESILIENT_CLIENT_REQUEST_TIMEOUT", "2");
            env::set_var("RESILIENT_CLIENT_DETAILED_LOGGING", "false");
            env::set_var("RESILIENT_CLIENT_RETRY_MAX_ATTEMPTS", "2");
        }

        let config = ResilientClientConfig::from_env();
        assert_eq!(config.request_timeout_seconds, 2);
        assert!(!config.enable_detailed_logging);
        assert_eq!(config.retry.max_attempts, 2);

        clear();
    }

    #[test]
    fn test_circuit_breaker_ignores_environment() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear();

        unsafe {
            env::set_var("RESILIENT_CLIENT_CB_FAILURE_THRESHOLD", "10");
        }

        let config = ResilientClientConfig::from_env();
        assert_eq!(
            config.circuit_breaker.failure_threshold,
            ResilientClientConfig::default().circuit_breaker.failure_threshold
        );

        clear();
    }

    #[test]
    fn test_retry_status_codes_parsing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        clear();

        unsafe {
            env::set_var("RESILIENT_CLIENT_RETRY_ON_STATUS", "500, 502,bogus,503");
        }

        let config = RetryConfig::from_env();
        assert_eq!(config.retry_on_status, vec![500, 502, 503]);

        clear();
    }
}
