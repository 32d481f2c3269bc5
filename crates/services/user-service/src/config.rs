//! User service configuration.

use std::env;

use common::{ServiceConfig, StoreConfig};

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    /// Listen address
    pub service: ServiceConfig,
    /// Key-value store connection
    pub store: StoreConfig,
    /// Load the demo users before serving
    pub seed_demo_data: bool,
    /// Serve from an in-process store instead of Redis
    pub in_memory: bool,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: env::var("HOST").unwrap_or(defaults.service.host),
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.service.port),
            },
            store: StoreConfig {
                url: env::var("REDIS_URL")
                    .ok()
                    .filter(|url| !url.is_empty())
                    .unwrap_or(defaults.store.url),
                password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
                connect_timeout_seconds: env::var("REDIS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.store.connect_timeout_seconds),
                response_timeout_seconds: env::var("REDIS_RESPONSE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.store.response_timeout_seconds),
            },
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            in_memory: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "user-service".to_string(),
                ..ServiceConfig::default()
            },
            store: StoreConfig::default(),
            seed_demo_data: false,
            in_memory: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(parse_flag("YES"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_defaults() {
        let config = UserServiceConfig::default();
        assert_eq!(config.service.service_name, "user-service");
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.store.url, "redis://127.0.0.1:6379");
        assert!(config.store.password.is_none());
        assert!(!config.seed_demo_data);
    }
}
