//! In-memory implementation of SurveyRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::survey::Survey;
use crate::errors::DomainError;

use super::repository::SurveyRepository;

#[derive(Clone, Default)]
pub struct InMemorySurveyRepository {
    surveys: Arc<RwLock<HashMap<Uuid, Survey>>>,
}

impl InMemorySurveyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyRepository {
    async fn create(&self, survey: Survey) -> Result<Survey, DomainError> {
        let mut surveys = self.surveys.write().await;
        if surveys.values().any(|s| s.slug == survey.slug) {
            return Err(DomainError::Conflict {
                message: format!("Survey slug '{}' already taken", survey.slug),
            });
        }
        surveys.insert(survey.id, survey.clone());
        Ok(survey)
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        let surveys = self.surveys.read().await;
        Ok(surveys.values().any(|s| s.slug == slug))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Survey>, DomainError> {
        let surveys = self.surveys.read().await;
        Ok(surveys.values().find(|s| s.slug == slug).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Survey>, DomainError> {
        Ok(self.surveys.read().await.get(&id).cloned())
    }

    async fn find_latest_by_owner(
        &self,
        owner_account_id: Uuid,
    ) -> Result<Option<Survey>, DomainError> {
        let surveys = self.surveys.read().await;
        Ok(surveys
            .values()
            .filter(|s| s.is_owned_by(owner_account_id))
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    async fn append_question(&self, survey_id: Uuid, question_id: Uuid) -> Result<bool, DomainError> {
        let mut surveys = self.surveys.write().await;
        match surveys.get_mut(&survey_id) {
            Some(survey) => Ok(survey.add_question(question_id)),
            None => Err(DomainError::NotFound {
                message: "Survey not found".to_string(),
            }),
        }
    }
}
