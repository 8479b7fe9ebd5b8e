//! Survey repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::survey::Survey;
use crate::errors::DomainError;

#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Insert a survey. A slug that is already taken yields `DomainError::Conflict`.
    async fn create(&self, survey: Survey) -> Result<Survey, DomainError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Survey>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Survey>, DomainError>;

    /// Most recently created survey owned by `owner_account_id`
    async fn find_latest_by_owner(&self, owner_account_id: Uuid)
        -> Result<Option<Survey>, DomainError>;

    /// Append a question reference to the end of the survey's list.
    /// Appending a reference that is already present is a no-op returning `false`.
    async fn append_question(&self, survey_id: Uuid, question_id: Uuid) -> Result<bool, DomainError>;
}
