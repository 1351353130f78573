//! API configuration.

use std::env;
use std::time::Duration;

use common::{PaginationConfig, ServiceConfig};
use user_service_lib::config::UserServiceConfig;

/// Everything the HTTP server needs at startup.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    pub server: ServiceConfig,
    pub pagination: PaginationConfig,
    pub user_service: UserServiceConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let server = ServiceConfig::default();
        let pagination = PaginationConfig::default();

        Self {
            server: ServiceConfig {
                host: env::var("API_HOST").unwrap_or(server.host),
                port: env_or("API_PORT", server.port),
                log_level: env::var("LOG_LEVEL").unwrap_or(server.log_level),
                handler_timeout_seconds: env_or(
                    "HANDLER_TIMEOUT_SECONDS",
                    server.handler_timeout_seconds,
                ),
                ..server
            },
            pagination: PaginationConfig {
                default_limit: env_or("DEFAULT_PAGE_LIMIT", pagination.default_limit),
                // A zero cap would never make progress through `next` links
                max_page_size: env_or("MAX_PAGE_SIZE", pagination.max_page_size).max(1),
            },
            user_service: UserServiceConfig::from_env(),
        }
    }

    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.server.handler_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:3000");
        assert_eq!(config.pagination.default_limit, 5);
        assert_eq!(config.pagination.max_page_size, 100);
        assert_eq!(config.handler_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let debug = format!("{:?}", ApiConfig::default());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("postgres://"));
    }
}
