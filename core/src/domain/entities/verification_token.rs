//! One-time email verification code consumed during sign-up.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code (three random bytes, hex encoded)
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a code in minutes
pub const DEFAULT_WINDOW_MINUTES: i64 = 30;

/// Verification code issued to an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationToken {
    pub id: Uuid,

    /// Normalized (trimmed, lowercase) email the code was sent to
    pub email: String,

    /// Six uppercase hex characters, exposed to clients as `token`
    #[serde(rename = "token")]
    pub code: String,

    pub created_at: DateTime<Utc>,
}

impl VerificationToken {
    pub fn new(email: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            code: code.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether more than `window` has elapsed between creation and `now`.
    ///
    /// A code exactly `window` old is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now.signed_duration_since(self.created_at) > window
    }

    pub fn matches(&self, email: &str, code: &str) -> bool {
        self.email == email && self.code == code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_created(ago: Duration) -> (VerificationToken, DateTime<Utc>) {
        let now = Utc::now();
        let mut token = VerificationToken::new("owner@acme.com", "A1B2C3");
        token.created_at = now - ago;
        (token, now)
    }

    #[test]
    fn test_exactly_window_is_not_expired() {
        let window = Duration::minutes(DEFAULT_WINDOW_MINUTES);
        let (token, now) = token_created(window);
        assert!(!token.is_expired_at(now, window));
    }

    #[test]
    fn test_one_second_past_window_is_expired() {
        let window = Duration::minutes(DEFAULT_WINDOW_MINUTES);
        let (token, now) = token_created(window + Duration::seconds(1));
        assert!(token.is_expired_at(now, window));
    }

    #[test]
    fn test_fresh_token() {
        let window = Duration::minutes(DEFAULT_WINDOW_MINUTES);
        let (token, now) = token_created(Duration::zero());
        assert!(!token.is_expired_at(now, window));
        assert!(token.matches("owner@acme.com", "A1B2C3"));
        assert!(!token.matches("owner@acme.com", "a1b2c3"));
    }

    #[test]
    fn test_code_serialized_as_token() {
        let token = VerificationToken::new("owner@acme.com", "A1B2C3");
        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["token"], "A1B2C3");
        assert!(value.get("code").is_none());
        assert_eq!(value["email"], "owner@acme.com");
        assert!(value.get("createdAt").is_some());
    }
}
