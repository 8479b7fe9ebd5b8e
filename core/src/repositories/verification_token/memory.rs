//! In-memory implementation of VerificationTokenRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::DomainError;

use super::repository::VerificationTokenRepository;

#[derive(Clone, Default)]
pub struct InMemoryVerificationTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, VerificationToken>>>,
}

impl InMemoryVerificationTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a token while the caller already holds other locks
    pub(crate) async fn take(&self, id: Uuid) -> Option<VerificationToken> {
        self.tokens.write().await.remove(&id)
    }

    /// Replace a stored token; used by tests to age tokens
    pub async fn put(&self, token: VerificationToken) {
        self.tokens.write().await.insert(token.id, token);
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationTokenRepository for InMemoryVerificationTokenRepository {
    async fn create(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        self.tokens.write().await.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_email_and_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.matches(email, code)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        let mut found: Vec<VerificationToken> =
            tokens.values().filter(|t| t.email == email).cloned().collect();
        found.sort_by_key(|t| t.created_at);
        Ok(found)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.tokens.write().await.remove(&id).is_some())
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.email != email);
        Ok((before - tokens.len()) as u64)
    }
}
