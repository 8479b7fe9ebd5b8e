//! In-memory implementation of AnswerRepository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::question::Answer;
use crate::errors::DomainError;

use super::repository::AnswerRepository;

#[derive(Clone, Default)]
pub struct InMemoryAnswerRepository {
    answers: Arc<RwLock<Vec<Answer>>>,
}

impl InMemoryAnswerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnswerRepository for InMemoryAnswerRepository {
    async fn create_batch(&self, answers: Vec<Answer>) -> Result<Vec<Answer>, DomainError> {
        self.answers.write().await.extend(answers.iter().cloned());
        Ok(answers)
    }

    async fn find_by_question_ids(&self, question_ids: &[Uuid]) -> Result<Vec<Answer>, DomainError> {
        let answers = self.answers.read().await;
        let mut found: Vec<Answer> = answers
            .iter()
            .filter(|a| question_ids.contains(&a.question_id))
            .cloned()
            .collect();
        found.sort_by_key(|a| a.created_at);
        Ok(found)
    }
}
