//! Outgoing email abstraction used by the verification and auth workflows

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A plain-text email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    pub fn verification_code(to: &str, code: &str) -> Self {
        Self::new(
            to,
            "Verification Code",
            format!("Hello, your verification token is {}.\n\nThanks and regards", code),
        )
    }

    pub fn password_reset(to: &str, reset_url: &str, window_minutes: i64) -> Self {
        Self::new(
            to,
            "Password Reset",
            format!(
                "You requested a password reset. Use the link below within {} minutes to choose a new password:\n\n{}\n\nIf you did not request this, ignore this email.",
                window_minutes, reset_url
            ),
        )
    }
}

/// Trait for email delivery integration
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message; no retries are attempted by callers
    async fn send_email(&self, message: &EmailMessage) -> Result<(), String>;
}
