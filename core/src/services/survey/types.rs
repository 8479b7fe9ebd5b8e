//! Inputs and read models of the survey service

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::question::Question;
use crate::domain::entities::survey::Survey;

/// One submitted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerInput {
    pub question_id: Uuid,
    pub answer: String,
}

/// A survey with its questions expanded in survey order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyWithQuestions {
    #[serde(flatten)]
    pub survey: Survey,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponses {
    pub question: String,
    pub answers: Vec<String>,
}

/// Everything respondents answered on one survey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponses {
    /// Company name
    pub name: String,
    pub title: String,
    pub responses: Vec<QuestionResponses>,
}
