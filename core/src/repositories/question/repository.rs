//! Question repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::question::Question;
use crate::errors::DomainError;

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: Question) -> Result<Question, DomainError>;

    /// Questions whose id is in `ids`; missing ids are simply absent from the result
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Question>, DomainError>;
}
