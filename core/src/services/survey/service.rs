//! Survey service implementation

use std::collections::HashMap;
use std::sync::Arc;
use survey_shared::utils::slug::{normalize_slug, with_suffix, MAX_SLUG_LEN};
use uuid::Uuid;

use crate::domain::entities::question::{Answer, Question};
use crate::domain::entities::survey::Survey;
use crate::errors::{DomainError, DomainResult, SurveyError};
use crate::repositories::{AccountRepository, AnswerRepository, QuestionRepository, SurveyRepository};

use super::config::SurveyServiceConfig;
use super::types::{AnswerInput, QuestionResponses, SurveyResponses, SurveyWithQuestions};

pub struct SurveyService<A, S, Q, R>
where
    A: AccountRepository,
    S: SurveyRepository,
    Q: QuestionRepository,
    R: AnswerRepository,
{
    accounts: Arc<A>,
    surveys: Arc<S>,
    questions: Arc<Q>,
    answers: Arc<R>,
    config: SurveyServiceConfig,
}

impl<A, S, Q, R> SurveyService<A, S, Q, R>
where
    A: AccountRepository,
    S: SurveyRepository,
    Q: QuestionRepository,
    R: AnswerRepository,
{
    pub fn new(
        accounts: Arc<A>,
        surveys: Arc<S>,
        questions: Arc<Q>,
        answers: Arc<R>,
        config: SurveyServiceConfig,
    ) -> Self {
        Self {
            accounts,
            surveys,
            questions,
            answers,
            config,
        }
    }

    pub fn survey_url(&self, survey: &Survey) -> String {
        self.config.survey_url(&survey.slug)
    }

    /// Create a survey owned by `owner` with a unique slug derived from `title`
    pub async fn create_survey(&self, owner: Uuid, title: &str) -> DomainResult<Survey> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SurveyError::TitleRequired.into());
        }
        let base = normalize_slug(title, MAX_SLUG_LEN).ok_or(SurveyError::InvalidTitle)?;

        let mut candidate = base.clone();
        for suffix in 2..self.config.max_slug_attempts + 2 {
            if !self.surveys.slug_exists(&candidate).await? {
                match self.surveys.create(Survey::new(title, candidate.clone(), owner)).await {
                    Ok(survey) => {
                        tracing::info!(
                            survey_id = %survey.id,
                            owner = %owner,
                            slug = %survey.slug,
                            event = "survey_created",
                            "Survey created"
                        );
                        return Ok(survey);
                    }
                    // Lost a race for this slug; move on to the next suffix
                    Err(DomainError::Conflict { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
            candidate = match with_suffix(&base, suffix, MAX_SLUG_LEN) {
                Some(next) => next,
                None => break,
            };
        }

        Err(DomainError::internal(format!(
            "Could not find a free slug for '{}'",
            base
        )))
    }

    /// Add a question to a survey owned by `owner`
    pub async fn create_question(
        &self,
        owner: Uuid,
        survey_id: Uuid,
        text: &str,
    ) -> DomainResult<Question> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SurveyError::QuestionRequired.into());
        }

        let survey = self
            .surveys
            .find_by_id(survey_id)
            .await?
            .filter(|survey| survey.is_owned_by(owner))
            .ok_or(SurveyError::SurveyNotFound)?;

        let question = self.questions.create(Question::new(survey.id, text)).await?;
        self.surveys.append_question(survey.id, question.id).await?;

        tracing::info!(
            survey_id = %survey.id,
            question_id = %question.id,
            event = "question_created",
            "Question added to survey"
        );
        Ok(question)
    }

    /// Public view of a survey with its questions in order
    pub async fn get_survey(&self, slug: &str) -> DomainResult<SurveyWithQuestions> {
        let survey = self
            .surveys
            .find_by_slug(slug)
            .await?
            .ok_or(SurveyError::SurveyNotFound)?;

        let found = self.questions.find_by_ids(&survey.question_ids).await?;
        let (questions, missing) = in_survey_order(&survey, found);
        if let Some(id) = missing.first() {
            tracing::warn!(
                survey_id = %survey.id,
                question_id = %id,
                "Survey references a missing question"
            );
            return Err(SurveyError::QuestionNotFound.into());
        }

        Ok(SurveyWithQuestions { survey, questions })
    }

    /// Store a batch of answers. Question ids are not checked for existence.
    pub async fn respond(&self, inputs: Vec<AnswerInput>) -> DomainResult<Vec<Answer>> {
        if inputs.is_empty() {
            return Err(SurveyError::NoAnswers.into());
        }

        let answers: Vec<Answer> = inputs
            .into_iter()
            .map(|input| Answer::new(input.question_id, input.answer))
            .collect();
        let saved = self.answers.create_batch(answers).await?;

        tracing::info!(count = saved.len(), event = "answers_saved", "Survey response saved");
        Ok(saved)
    }

    /// Questions and answers of one of `owner`'s surveys; the survey named by
    /// `slug`, or the most recently created one.
    pub async fn get_responses(
        &self,
        owner: Uuid,
        slug: Option<&str>,
    ) -> DomainResult<SurveyResponses> {
        let account = self
            .accounts
            .find_by_id(owner)
            .await?
            .ok_or(SurveyError::CompanyNotFound)?;

        let survey = match slug {
            Some(slug) => self
                .surveys
                .find_by_slug(slug)
                .await?
                .filter(|survey| survey.is_owned_by(owner)),
            None => self.surveys.find_latest_by_owner(owner).await?,
        }
        .ok_or(SurveyError::NoSurveyForCompany)?;

        let found = self.questions.find_by_ids(&survey.question_ids).await?;
        let (questions, missing) = in_survey_order(&survey, found);
        if !missing.is_empty() {
            tracing::debug!(survey_id = %survey.id, missing = missing.len(), "Skipping missing questions");
        }
        let question_ids: Vec<Uuid> = questions.iter().map(|q| q.id).collect();
        let answers = self.answers.find_by_question_ids(&question_ids).await?;

        let mut grouped: HashMap<Uuid, Vec<String>> = HashMap::new();
        for answer in answers {
            grouped.entry(answer.question_id).or_default().push(answer.text);
        }

        let responses = questions
            .into_iter()
            .map(|question| QuestionResponses {
                answers: grouped.remove(&question.id).unwrap_or_default(),
                question: question.text,
            })
            .collect();

        Ok(SurveyResponses {
            name: account.name,
            title: survey.title,
            responses,
        })
    }
}

/// Arrange `found` in the order the survey lists its questions; ids with no
/// matching question are returned separately.
fn in_survey_order(survey: &Survey, found: Vec<Question>) -> (Vec<Question>, Vec<Uuid>) {
    let mut by_id: HashMap<Uuid, Question> = found.into_iter().map(|q| (q.id, q)).collect();
    let mut questions = Vec::with_capacity(survey.question_ids.len());
    let mut missing = Vec::new();
    for id in &survey.question_ids {
        match by_id.remove(id) {
            Some(question) => questions.push(question),
            None => missing.push(*id),
        }
    }
    (questions, missing)
}
