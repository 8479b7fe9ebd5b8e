//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, SurveyError, TokenError};

use thiserror::Error;

/// Coarse classification every domain failure maps onto.
///
/// The HTTP layer turns each kind into a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Conflict,
    NotFound,
    Unauthenticated,
    Expired,
    Internal,
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Unauthenticated! Please login.")]
    Unauthorized,

    #[error("{message}")]
    Expired { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Survey(#[from] SurveyError),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::InvalidInput,
            DomainError::Conflict { .. } => ErrorKind::Conflict,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Unauthorized => ErrorKind::Unauthenticated,
            DomainError::Expired { .. } => ErrorKind::Expired,
            DomainError::Internal { .. } => ErrorKind::Internal,
            DomainError::Auth(err) => err.kind(),
            DomainError::Token(err) => err.kind(),
            DomainError::Survey(err) => err.kind(),
        }
    }

    /// Shorthand for a storage or collaborator failure
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
