//! Questions and the answers submitted for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub survey_id: Uuid,
    #[serde(rename = "question")]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(survey_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            survey_id,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// A respondent's answer. The question reference is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: Uuid,
    #[serde(rename = "question")]
    pub question_id: Uuid,
    #[serde(rename = "answer")]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    pub fn new(question_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_id,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}
