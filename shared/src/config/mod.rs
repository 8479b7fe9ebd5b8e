//! Configuration module with business-specific sub-modules
//!
//! - `auth` - session tokens, one-time token windows and sign-up policy
//! - `database` - MySQL pool settings and storage backend selection
//! - `environment` - environment detection and logging configuration
//! - `notification` - outgoing email channel, SMTP and queue settings
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod notification;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use auth::{AuthConfig, JwtConfig, PendingVerificationPolicy};
pub use database::{DatabaseConfig, StorageBackend};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::{NotificationChannel, NotificationConfig, QueueConfig, SmtpConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    pub storage: StorageBackend,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub notification: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            storage: StorageBackend::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            notification: NotificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(environment),
            storage: StorageBackend::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            notification: NotificationConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is unset or does not parse.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Read an optional environment variable; empty values count as unset.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.auth.verification_window_minutes, 30);
        assert_eq!(config.auth.pending_verification, PendingVerificationPolicy::Reject);
        assert!(config.auth.jwt.session_ttl_minutes.is_none());
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        std::env::set_var("SURVEY_TEST_ENV_OR", "not-a-number");
        assert_eq!(env_or("SURVEY_TEST_ENV_OR", 7u32), 7);
        std::env::set_var("SURVEY_TEST_ENV_OR", " 12 ");
        assert_eq!(env_or("SURVEY_TEST_ENV_OR", 7u32), 12);
        std::env::remove_var("SURVEY_TEST_ENV_OR");
    }
}
