//! MySQL implementations of the core repository traits

mod account_repository_impl;
mod answer_repository_impl;
mod question_repository_impl;
mod survey_repository_impl;
mod verification_token_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use answer_repository_impl::MySqlAnswerRepository;
pub use question_repository_impl::MySqlQuestionRepository;
pub use survey_repository_impl::MySqlSurveyRepository;
pub use verification_token_repository_impl::MySqlVerificationTokenRepository;

use survey_core::errors::DomainError;
use uuid::Uuid;

/// Wrap a SQLx error as an internal domain error with some context
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", column, e),
    })
}

pub(crate) fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}
