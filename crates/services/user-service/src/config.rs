//! User service configuration.

use std::env;
use std::time::Duration;

use common::DatabaseConfig;
use sea_orm::ConnectOptions;

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.min_connections),
            },
        }
    }

    /// Pool options for the configured database.
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.database.url.clone());
        options
            .max_connections(self.database.max_connections)
            .min_connections(self.database.min_connections)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(false);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_options_use_pool_sizes() {
        let config = UserServiceConfig {
            database: DatabaseConfig {
                url: "postgres://user:secret@db:5432/users".to_string(),
                max_connections: 7,
                min_connections: 2,
            },
        };

        let options = config.connect_options();
        assert_eq!(options.get_url(), "postgres://user:secret@db:5432/users");
        assert_eq!(options.get_max_connections(), Some(7));
        assert_eq!(options.get_min_connections(), Some(2));
    }

    #[test]
    fn test_debug_hides_database_url() {
        let config = UserServiceConfig::default();
        assert!(!format!("{:?}", config).contains("password@"));
    }
}
