//! HTTP server bind configuration.

use std::env;

/// Address the HTTP server listens on
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    #[test]
    fn test_server_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::remove_var("HOST");
            env::set_var("PORT", "8081");
        }

        let config = ServerConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8081);

        unsafe {
            env::set_var("PORT", "not-a-port");
        }
        assert_eq!(ServerConfig::from_env().port, 5000);

        unsafe {
            env::remove_var("PORT");
        }
    }
}
