//! # Survey Core
//!
//! Core business logic and domain layer for the survey backend.
//! This crate contains domain entities, workflow services, repository
//! interfaces with in-memory implementations, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Account, AccountRole, AccountView, Answer, NewAccount, Question, SessionClaims, Survey,
    VerificationToken,
};
pub use errors::{AuthError, DomainError, DomainResult, ErrorKind, SurveyError, TokenError};
pub use repositories::{
    AccountRepository, AnswerRepository, QuestionRepository, SurveyRepository,
    VerificationTokenRepository,
};
pub use services::{
    AuthService, AuthServiceConfig, EmailMessage, Notifier, SessionGrant, SessionTokenConfig,
    SessionTokenService, SurveyService, SurveyServiceConfig, VerificationService,
    VerificationServiceConfig,
};
