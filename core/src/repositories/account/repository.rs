//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
///
/// Email uniqueness is enforced by the store. A duplicate insert must be
/// reported as `DomainError::Conflict` so callers can tell it apart from
/// storage failures.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find the account holding the given SHA-256 reset token hash
    async fn find_by_reset_token_hash(&self, token_hash: &str)
        -> Result<Option<Account>, DomainError>;

    /// Insert `account` and delete verification token `token_id` atomically.
    ///
    /// Either both changes are applied or neither is.
    async fn create_and_consume_token(
        &self,
        account: Account,
        token_id: Uuid,
    ) -> Result<Account, DomainError>;

    /// Persist changes to an existing account
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - no account with this id
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Store the new password of `account` and clear its reset token, but only
    /// while the stored token hash still equals `token_hash`.
    ///
    /// # Returns
    /// * `Ok(None)` - the token was already consumed or replaced
    async fn consume_reset_token(
        &self,
        account: Account,
        token_hash: &str,
    ) -> Result<Option<Account>, DomainError>;
}
