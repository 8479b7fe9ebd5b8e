//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and migrations
//! - Repository implementations for every `survey_core` repository trait

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::{
    MySqlAccountRepository, MySqlAnswerRepository, MySqlQuestionRepository,
    MySqlSurveyRepository, MySqlVerificationTokenRepository,
};
