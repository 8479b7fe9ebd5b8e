//! Main verification service implementation

use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use std::sync::Arc;
use survey_shared::config::PendingVerificationPolicy;
use survey_shared::utils::mask_email;
use survey_shared::utils::validation::normalize_email;

use crate::domain::entities::account::{Account, AccountView, NewAccount};
use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{AccountRepository, VerificationTokenRepository};
use crate::services::notification::{EmailMessage, Notifier};
use crate::services::password::hash_password;

use super::config::VerificationServiceConfig;

/// Generate a six character uppercase hex code from three OS random bytes
pub fn generate_code() -> String {
    let mut bytes = [0u8; 3];
    OsRng.fill_bytes(&mut bytes);
    hex::encode_upper(bytes)
}

/// Issues verification codes and turns a valid code into an account
pub struct VerificationService<A, T, N>
where
    A: AccountRepository,
    T: VerificationTokenRepository,
    N: Notifier,
{
    accounts: Arc<A>,
    tokens: Arc<T>,
    notifier: Arc<N>,
    config: VerificationServiceConfig,
}

impl<A, T, N> VerificationService<A, T, N>
where
    A: AccountRepository,
    T: VerificationTokenRepository,
    N: Notifier,
{
    pub fn new(
        accounts: Arc<A>,
        tokens: Arc<T>,
        notifier: Arc<N>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            accounts,
            tokens,
            notifier,
            config,
        }
    }

    fn window(&self) -> Duration {
        Duration::minutes(self.config.window_minutes)
    }

    /// Issue a code to `email` and send it by email
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationToken)` - the stored token record
    /// * `Err(AuthError::EmailRequired)` - blank email
    /// * `Err(AuthError::AccountAlreadyRegistered)` - an account already uses the email
    /// * `Err(AuthError::VerificationPending)` - an unexpired code exists and the
    ///   pending policy is `Reject`
    /// * `Err(AuthError::NotificationFailed)` - the email could not be sent; the
    ///   stored code is removed again
    pub async fn request_verification(&self, email: &str) -> DomainResult<VerificationToken> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AuthError::EmailRequired.into());
        }

        if self.accounts.find_by_email(&email).await?.is_some() {
            tracing::info!(
                email = %mask_email(&email),
                event = "verification_rejected_registered",
                "Verification requested for a registered email"
            );
            return Err(AuthError::AccountAlreadyRegistered.into());
        }

        self.apply_pending_policy(&email).await?;

        let token = self
            .tokens
            .create(VerificationToken::new(email.clone(), generate_code()))
            .await?;

        let message = EmailMessage::verification_code(&token.email, &token.code);
        if let Err(reason) = self.notifier.send_email(&message).await {
            tracing::error!(
                email = %mask_email(&email),
                error = %reason,
                event = "verification_email_failed",
                "Failed to send verification code"
            );
            if let Err(e) = self.tokens.delete(token.id).await {
                tracing::warn!(
                    token_id = %token.id,
                    error = %e,
                    "Failed to remove undelivered verification token"
                );
            }
            return Err(AuthError::NotificationFailed { reason }.into());
        }

        tracing::info!(
            email = %mask_email(&email),
            token_id = %token.id,
            event = "verification_code_sent",
            "Verification code sent"
        );

        Ok(token)
    }

    /// Drop expired codes for `email`, then apply the configured policy to
    /// the ones still live.
    async fn apply_pending_policy(&self, email: &str) -> DomainResult<()> {
        let now = Utc::now();
        let window = self.window();
        let mut live = Vec::new();

        for token in self.tokens.find_by_email(email).await? {
            if token.is_expired_at(now, window) {
                self.tokens.delete(token.id).await?;
            } else {
                live.push(token);
            }
        }

        if live.is_empty() {
            return Ok(());
        }

        match self.config.pending_policy {
            PendingVerificationPolicy::Reject => Err(AuthError::VerificationPending.into()),
            PendingVerificationPolicy::Replace => {
                let removed = self.tokens.delete_by_email(email).await?;
                tracing::debug!(removed, "Replaced pending verification codes");
                Ok(())
            }
            PendingVerificationPolicy::AllowDuplicates => Ok(()),
        }
    }

    /// Create a company account from a valid, unexpired code
    ///
    /// The account insert and the token deletion happen in one transaction.
    pub async fn sign_up(&self, fields: NewAccount, code: &str) -> DomainResult<AccountView> {
        let fields = NewAccount {
            email: normalize_email(&fields.email),
            ..fields
        };

        if self.accounts.find_by_email(&fields.email).await?.is_some() {
            return Err(AuthError::CompanyAlreadyExists.into());
        }

        let token = self
            .tokens
            .find_by_email_and_code(&fields.email, code.trim())
            .await?
            .ok_or(AuthError::InvalidVerificationToken)?;

        if token.is_expired_at(Utc::now(), self.window()) {
            self.tokens.delete(token.id).await?;
            tracing::info!(
                email = %mask_email(&fields.email),
                token_id = %token.id,
                event = "verification_token_expired",
                "Expired verification token presented"
            );
            return Err(AuthError::VerificationTokenExpired.into());
        }

        let password_hash = hash_password(&fields.password, self.config.bcrypt_cost).await?;
        let account = Account::company(&fields, password_hash);

        let account = match self.accounts.create_and_consume_token(account, token.id).await {
            Ok(account) => account,
            Err(DomainError::Conflict { .. }) => return Err(AuthError::CompanyAlreadyExists.into()),
            Err(e) => return Err(e),
        };

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "company_signed_up",
            "Company account created"
        );

        Ok(account.view())
    }
}
