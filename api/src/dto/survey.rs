use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use survey_core::errors::SurveyError;
use survey_core::services::survey::AnswerInput;

use super::RequestRules;
use crate::handlers::ApiError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSurveyRequest {
    pub title: Option<String>,
    /// Session token, for clients that cannot set headers
    pub authorization: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(
        required(message = "\"question\" is required"),
        length(min = 1, message = "\"question\" is not allowed to be empty")
    )]
    pub question: Option<String>,

    /// Id of the survey the question belongs to
    #[validate(
        required(message = "\"survey\" is required"),
        length(min = 1, message = "\"survey\" is not allowed to be empty")
    )]
    pub survey: Option<String>,

    pub authorization: Option<String>,
}

impl RequestRules for CreateQuestionRequest {
    const FIELDS: &'static [&'static str] = &["question", "survey"];
}

impl CreateQuestionRequest {
    pub fn survey_id(&self) -> Result<Uuid, ApiError> {
        let raw = self.survey.as_deref().unwrap_or_default().trim();
        Uuid::parse_str(raw).map_err(|_| SurveyError::InvalidSurveyId.into())
    }
}

/// One item of a response batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerItem {
    /// Question id
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// Check every item in order and convert the batch
pub fn answer_inputs(items: Vec<AnswerItem>) -> Result<Vec<AnswerInput>, ApiError> {
    let mut inputs = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let question = match item.question {
            Some(question) if !question.trim().is_empty() => question,
            _ => {
                return Err(ApiError::Validation(format!(
                    "\"[{}].question\" is required",
                    index
                )))
            }
        };
        let answer = match item.answer {
            Some(answer) if !answer.is_empty() => answer,
            _ => {
                return Err(ApiError::Validation(format!(
                    "\"[{}].answer\" is required",
                    index
                )))
            }
        };
        let question_id =
            Uuid::parse_str(question.trim()).map_err(|_| ApiError::from(SurveyError::InvalidQuestionId))?;

        inputs.push(AnswerInput {
            question_id,
            answer,
        });
    }

    Ok(inputs)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesQuery {
    pub slug: Option<String>,
}
