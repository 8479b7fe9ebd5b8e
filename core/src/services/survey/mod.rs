//! Surveys, their questions and the answers respondents submit

mod config;
mod service;
mod types;


pub use config::SurveyServiceConfig;
pub use service::SurveyService;
pub use types::{AnswerInput, QuestionResponses, SurveyResponses, SurveyWithQuestions};
