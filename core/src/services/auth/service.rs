//! Authentication service implementation

use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use survey_shared::utils::mask_email;
use survey_shared::utils::validation::normalize_email;

use crate::domain::entities::account::{Account, AccountView};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::notification::{EmailMessage, Notifier};
use crate::services::password::{hash_password, verify_password};
use crate::services::session::SessionTokenService;

use super::config::AuthServiceConfig;

/// Number of random bytes in a raw reset token (hex encoded to 40 chars)
const RESET_TOKEN_BYTES: usize = 20;

/// SHA-256 hex digest under which a raw reset token is stored
pub fn hash_reset_token(raw_token: &str) -> String {
    hex::encode(Sha256::digest(raw_token.as_bytes()))
}

fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Session token plus the account it was issued for
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub token: String,
    pub account: AccountView,
}

pub struct AuthService<A: AccountRepository, N: Notifier> {
    accounts: Arc<A>,
    notifier: Arc<N>,
    sessions: Arc<SessionTokenService>,
    config: AuthServiceConfig,
}

impl<A: AccountRepository, N: Notifier> AuthService<A, N> {
    pub fn new(
        accounts: Arc<A>,
        notifier: Arc<N>,
        sessions: Arc<SessionTokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            accounts,
            notifier,
            sessions,
            config,
        }
    }

    async fn require_account(&self, email: &str) -> DomainResult<Account> {
        let email = normalize_email(email);
        self.accounts
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::AccountNotFound.into())
    }

    fn grant(&self, account: &Account) -> DomainResult<SessionGrant> {
        Ok(SessionGrant {
            token: self.sessions.issue(account)?,
            account: account.view(),
        })
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<SessionGrant> {
        let account = self.require_account(email).await?;

        if !verify_password(password, &account.password_hash).await? {
            tracing::info!(
                account_id = %account.id,
                event = "login_failed",
                "Incorrect password"
            );
            return Err(AuthError::IncorrectPassword.into());
        }

        tracing::info!(account_id = %account.id, event = "login_succeeded", "Company logged in");
        self.grant(&account)
    }

    /// Issue a reset token and email the reset link.
    ///
    /// A previously issued token is replaced. If the email cannot be sent the
    /// new token is cleared again.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let mut account = self.require_account(email).await?;

        let raw_token = generate_reset_token();
        account.issue_reset_token(hash_reset_token(&raw_token), Utc::now());
        let mut account = self.accounts.update(account).await?;

        let message = EmailMessage::password_reset(
            &account.email,
            &self.config.reset_url(&raw_token),
            self.config.reset_window_minutes,
        );
        if let Err(reason) = self.notifier.send_email(&message).await {
            tracing::error!(
                account_id = %account.id,
                error = %reason,
                event = "reset_email_failed",
                "Failed to send password reset email"
            );
            account.clear_reset_token();
            if let Err(e) = self.accounts.update(account).await {
                tracing::warn!(error = %e, "Failed to clear undelivered reset token");
            }
            return Err(AuthError::NotificationFailed { reason }.into());
        }

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "reset_token_issued",
            "Password reset link sent"
        );
        Ok(())
    }

    /// Consume a reset token, set the new password and start a session
    pub async fn reset_password(
        &self,
        raw_token: &str,
        password: &str,
        confirm_password: &str,
    ) -> DomainResult<SessionGrant> {
        let token_hash = hash_reset_token(raw_token.trim());
        let mut account = self
            .accounts
            .find_by_reset_token_hash(&token_hash)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        let window = Duration::minutes(self.config.reset_window_minutes);
        if account.reset_token_expired_at(Utc::now(), window) {
            account.clear_reset_token();
            self.accounts.update(account).await?;
            return Err(AuthError::ResetTokenExpired.into());
        }

        if password != confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        account.set_password_hash(password_hash);
        account.clear_reset_token();
        let account = self
            .accounts
            .consume_reset_token(account, &token_hash)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        tracing::info!(account_id = %account.id, event = "password_reset", "Password reset");
        self.grant(&account)
    }
}
