//! Metrics configuration.

use std::env;

/// Whether `/api/metrics` serves the Prometheus registry
#[derive(Clone, Debug)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// Load `METRICS_ENABLED`; anything but a parsable bool keeps metrics on
    pub fn from_env() -> Self {
        let enabled = env::var("METRICS_ENABLED")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(true);

        Self { enabled }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    #[test]
    fn test_metrics_toggle() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::set_var("METRICS_ENABLED", "false");
        }
        assert!(!MetricsConfig::from_env().enabled);

        unsafe {
            env::set_var("METRICS_ENABLED", "maybe");
        }
        assert!(MetricsConfig::from_env().enabled);

        unsafe {
            env::remove_var("METRICS_ENABLED");
        }
        assert!(MetricsConfig::from_env().enabled);
    }
}
