//! Answer repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::question::Answer;
use crate::errors::DomainError;

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Store all answers or none of them
    async fn create_batch(&self, answers: Vec<Answer>) -> Result<Vec<Answer>, DomainError>;

    /// Answers for any of the given questions, oldest first
    async fn find_by_question_ids(&self, question_ids: &[Uuid]) -> Result<Vec<Answer>, DomainError>;
}
