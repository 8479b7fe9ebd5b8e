//! Authentication configuration module

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

/// How a new verification request treats an unexpired code already
/// pending for the same email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PendingVerificationPolicy {
    /// Refuse the request with a conflict
    Reject,
    /// Delete the pending codes and issue a fresh one
    Replace,
    /// Keep the pending codes and issue another one
    AllowDuplicates,
}

impl Default for PendingVerificationPolicy {
    fn default() -> Self {
        PendingVerificationPolicy::Reject
    }
}

impl std::fmt::Display for PendingVerificationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PendingVerificationPolicy::Reject => write!(f, "reject"),
            PendingVerificationPolicy::Replace => write!(f, "replace"),
            PendingVerificationPolicy::AllowDuplicates => write!(f, "allow-duplicates"),
        }
    }
}

impl std::str::FromStr for PendingVerificationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "reject" => Ok(PendingVerificationPolicy::Reject),
            "replace" => Ok(PendingVerificationPolicy::Replace),
            "allow-duplicates" | "allow" => Ok(PendingVerificationPolicy::AllowDuplicates),
            _ => Err(format!("Invalid pending verification policy: {}", s)),
        }
    }
}

/// Session token (JWT) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used for HS256 signing
    pub secret: String,

    /// Value of the `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Session lifetime in minutes; `None` issues tokens without `exp`
    #[serde(default)]
    pub session_ttl_minutes: Option<i64>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("change-me-in-production"),
            issuer: default_issuer(),
            session_ttl_minutes: None,
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_session_ttl(mut self, minutes: i64) -> Self {
        self.session_ttl_minutes = Some(minutes);
        self
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,

    /// Lifetime of an email verification code in minutes
    #[serde(default = "default_window_minutes")]
    pub verification_window_minutes: i64,

    /// Lifetime of a password reset token in minutes
    #[serde(default = "default_window_minutes")]
    pub reset_window_minutes: i64,

    #[serde(default)]
    pub pending_verification: PendingVerificationPolicy,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            verification_window_minutes: default_window_minutes(),
            reset_window_minutes: default_window_minutes(),
            pending_verification: PendingVerificationPolicy::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let jwt = JwtConfig {
            secret: env_opt("JWT_SECRET").unwrap_or(defaults.jwt.secret),
            issuer: env_opt("JWT_ISSUER").unwrap_or(defaults.jwt.issuer),
            session_ttl_minutes: env_opt("SESSION_TTL_MINUTES").and_then(|v| v.parse().ok()),
        };

        Self {
            jwt,
            verification_window_minutes: env_or(
                "VERIFICATION_WINDOW_MINUTES",
                defaults.verification_window_minutes,
            ),
            reset_window_minutes: env_or("RESET_WINDOW_MINUTES", defaults.reset_window_minutes),
            pending_verification: env_or(
                "PENDING_VERIFICATION_POLICY",
                defaults.pending_verification,
            ),
            bcrypt_cost: env_or("BCRYPT_COST", defaults.bcrypt_cost),
        }
    }
}

fn default_issuer() -> String {
    String::from("survey-backend")
}

fn default_window_minutes() -> i64 {
    30
}

fn default_bcrypt_cost() -> u32 {
    10
}
