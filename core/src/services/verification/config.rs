//! Configuration for the verification service

use survey_shared::config::{AuthConfig, PendingVerificationPolicy};

use crate::domain::entities::verification_token::DEFAULT_WINDOW_MINUTES;

#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Minutes a code stays valid
    pub window_minutes: i64,
    /// What to do when an unexpired code is already pending for the email
    pub pending_policy: PendingVerificationPolicy,
    /// bcrypt work factor used when the account is created
    pub bcrypt_cost: u32,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            window_minutes: DEFAULT_WINDOW_MINUTES,
            pending_policy: PendingVerificationPolicy::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl From<&AuthConfig> for VerificationServiceConfig {
    fn from(auth: &AuthConfig) -> Self {
        Self {
            window_minutes: auth.verification_window_minutes,
            pending_policy: auth.pending_verification,
            bcrypt_cost: auth.bcrypt_cost,
        }
    }
}
