//! Verification token repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::DomainError;

/// Persistence for one-time sign-up codes.
///
/// Several tokens may exist for one email; whether that is allowed is
/// decided by the verification workflow, not by storage.
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    async fn create(&self, token: VerificationToken) -> Result<VerificationToken, DomainError>;

    /// Find the token matching both the (normalized) email and the code
    async fn find_by_email_and_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<VerificationToken>, DomainError>;

    /// All tokens issued to `email`, oldest first
    async fn find_by_email(&self, email: &str) -> Result<Vec<VerificationToken>, DomainError>;

    /// Returns `true` if a token was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Returns the number of tokens removed
    async fn delete_by_email(&self, email: &str) -> Result<u64, DomainError>;
}
