//! In-memory implementation of AccountRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;
use crate::repositories::verification_token::InMemoryVerificationTokenRepository;

use super::repository::AccountRepository;

/// Accounts kept in a map. Shares the token store so sign-up can consume a
/// token under the same write lock that inserts the account.
#[derive(Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    tokens: Arc<InMemoryVerificationTokenRepository>,
}

impl InMemoryAccountRepository {
    pub fn new(tokens: Arc<InMemoryVerificationTokenRepository>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            tokens,
        }
    }

    /// Insert an account directly, bypassing sign-up; used to seed tests
    pub async fn insert(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Conflict {
                message: "Account email already registered".to_string(),
            });
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.reset_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    async fn create_and_consume_token(
        &self,
        account: Account,
        token_id: Uuid,
    ) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Conflict {
                message: "Account email already registered".to_string(),
            });
        }

        self.tokens.take(token_id).await;
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::NotFound {
                message: "Account not found".to_string(),
            });
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn consume_reset_token(
        &self,
        account: Account,
        token_hash: &str,
    ) -> Result<Option<Account>, DomainError> {
        let mut accounts = self.accounts.write().await;

        match accounts.get_mut(&account.id) {
            Some(stored) if stored.reset_token_hash.as_deref() == Some(token_hash) => {
                stored.password_hash = account.password_hash;
                stored.reset_token_hash = None;
                stored.reset_token_issued_at = None;
                stored.updated_at = account.updated_at;
                Ok(Some(stored.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::account::NewAccount;
    use crate::domain::entities::verification_token::VerificationToken;
    use crate::repositories::verification_token::VerificationTokenRepository;

    fn account(email: &str) -> Account {
        let fields = NewAccount {
            name: "Acme Research Ltd".to_string(),
            email: email.to_string(),
            address: "1 Main Street".to_string(),
            city: "Ikeja".to_string(),
            state: "Lagos".to_string(),
            password: "secret1".to_string(),
        };
        Account::company(&fields, "hash".to_string())
    }

    #[tokio::test]
    async fn test_create_consumes_token() {
        let tokens = Arc::new(InMemoryVerificationTokenRepository::new());
        let repo = InMemoryAccountRepository::new(tokens.clone());
        let token = tokens
            .create(VerificationToken::new("owner@acme.com", "ABC123"))
            .await
            .unwrap();

        let created = repo
            .create_and_consume_token(account("owner@acme.com"), token.id)
            .await
            .unwrap();

        assert!(tokens.is_empty().await);
        let found = repo.find_by_email("owner@acme.com").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(created.id));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict_and_keeps_token() {
        let tokens = Arc::new(InMemoryVerificationTokenRepository::new());
        let repo = InMemoryAccountRepository::new(tokens.clone());
        repo.insert(account("owner@acme.com")).await.unwrap();
        let token = tokens
            .create(VerificationToken::new("owner@acme.com", "ABC123"))
            .await
            .unwrap();

        let result = repo
            .create_and_consume_token(account("owner@acme.com"), token.id)
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(tokens.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_unknown_account() {
        let repo = InMemoryAccountRepository::new(Arc::new(InMemoryVerificationTokenRepository::new()));
        let result = repo.update(account("owner@acme.com")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_find_by_reset_token_hash() {
        let repo = InMemoryAccountRepository::new(Arc::new(InMemoryVerificationTokenRepository::new()));
        let mut stored = repo.insert(account("owner@acme.com")).await.unwrap();
        stored.issue_reset_token("deadbeef".to_string(), chrono::Utc::now());
        repo.update(stored.clone()).await.unwrap();

        let found = repo.find_by_reset_token_hash("deadbeef").await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(stored.id));
        assert!(repo.find_by_reset_token_hash("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_consume_reset_token_requires_current_hash() {
        let repo = InMemoryAccountRepository::new(Arc::new(InMemoryVerificationTokenRepository::new()));
        let mut stored = repo.insert(account("owner@acme.com")).await.unwrap();
        stored.issue_reset_token("deadbeef".to_string(), chrono::Utc::now());
        repo.update(stored.clone()).await.unwrap();

        stored.set_password_hash("new-hash".to_string());
        stored.clear_reset_token();
        let consumed = repo.consume_reset_token(stored.clone(), "deadbeef").await.unwrap().unwrap();
        assert_eq!(consumed.password_hash, "new-hash");
        assert!(consumed.reset_token_hash.is_none());

        assert!(repo.consume_reset_token(stored, "deadbeef").await.unwrap().is_none());
    }
}
