//! Configuration for the session token service

use survey_shared::config::JwtConfig;

#[derive(Debug, Clone)]
pub struct SessionTokenConfig {
    /// HMAC signing secret
    pub secret: String,
    pub issuer: String,
    /// Lifetime in minutes; `None` issues tokens without `exp`
    pub ttl_minutes: Option<i64>,
}

impl Default for SessionTokenConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            issuer: "survey-backend".to_string(),
            ttl_minutes: None,
        }
    }
}

impl From<&JwtConfig> for SessionTokenConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            secret: jwt.secret.clone(),
            issuer: jwt.issuer.clone(),
            ttl_minutes: jwt.session_ttl_minutes,
        }
    }
}
