//! Workflow-specific error types
//!
//! Display strings are the messages returned to API clients, except for
//! `Internal` kinds which are only logged.

use thiserror::Error;

use super::ErrorKind;

/// Verification, sign-up, login and password reset failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please provide an email")]
    EmailRequired,

    #[error("You already have an account with us")]
    AccountAlreadyRegistered,

    #[error("A verification code has already been sent to this email")]
    VerificationPending,

    #[error("Company already exists")]
    CompanyAlreadyExists,

    #[error("Invalid verification token")]
    InvalidVerificationToken,

    #[error("Verification token has expired")]
    VerificationTokenExpired,

    #[error("Sorry you do not have an account with us")]
    AccountNotFound,

    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("Invalid password reset token")]
    InvalidResetToken,

    #[error("Password reset token has expired")]
    ResetTokenExpired,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Notification delivery failed: {reason}")]
    NotificationFailed { reason: String },

    #[error("Password hashing failed: {reason}")]
    PasswordHashing { reason: String },
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailRequired
            | AuthError::InvalidVerificationToken
            | AuthError::IncorrectPassword
            | AuthError::InvalidResetToken
            | AuthError::PasswordMismatch => ErrorKind::InvalidInput,
            AuthError::AccountAlreadyRegistered
            | AuthError::VerificationPending
            | AuthError::CompanyAlreadyExists => ErrorKind::Conflict,
            AuthError::VerificationTokenExpired | AuthError::ResetTokenExpired => {
                ErrorKind::Expired
            }
            AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::NotificationFailed { .. } | AuthError::PasswordHashing { .. } => {
                ErrorKind::Internal
            }
        }
    }
}

/// Session token failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid issuer")]
    InvalidIssuer,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::TokenGenerationFailed => ErrorKind::Internal,
            _ => ErrorKind::Unauthenticated,
        }
    }
}

/// Survey, question and response failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    #[error("Survey not found")]
    SurveyNotFound,

    #[error("Question does not exist")]
    QuestionNotFound,

    #[error("Company could not be found")]
    CompanyNotFound,

    #[error("Survey could not be found")]
    NoSurveyForCompany,

    #[error("Please provide the title of the survey")]
    TitleRequired,

    #[error("\"title\" must contain at least one letter or digit")]
    InvalidTitle,

    #[error("Please provide the question")]
    QuestionRequired,

    #[error("Please provide at least one answer")]
    NoAnswers,

    #[error("\"question\" must be a valid question id")]
    InvalidQuestionId,

    #[error("\"survey\" must be a valid survey id")]
    InvalidSurveyId,
}

impl SurveyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SurveyError::SurveyNotFound
            | SurveyError::QuestionNotFound
            | SurveyError::CompanyNotFound
            | SurveyError::NoSurveyForCompany => ErrorKind::NotFound,
            SurveyError::TitleRequired
            | SurveyError::InvalidTitle
            | SurveyError::QuestionRequired
            | SurveyError::NoAnswers
            | SurveyError::InvalidQuestionId
            | SurveyError::InvalidSurveyId => ErrorKind::InvalidInput,
        }
    }
}
