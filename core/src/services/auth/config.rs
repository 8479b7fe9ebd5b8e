//! Configuration for the authentication service

use survey_shared::config::{AuthConfig, ServerConfig};

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minutes a password reset token stays valid
    pub reset_window_minutes: i64,
    /// bcrypt work factor for new passwords
    pub bcrypt_cost: u32,
    /// Base URL the reset link is built from
    pub public_base_url: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            reset_window_minutes: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            public_base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl AuthServiceConfig {
    pub fn from_config(auth: &AuthConfig, server: &ServerConfig) -> Self {
        Self {
            reset_window_minutes: auth.reset_window_minutes,
            bcrypt_cost: auth.bcrypt_cost,
            public_base_url: server.public_base_url.clone(),
        }
    }

    pub fn reset_url(&self, raw_token: &str) -> String {
        format!(
            "{}/api/v1/auth/reset-password/{}",
            self.public_base_url.trim_end_matches('/'),
            raw_token
        )
    }
}
