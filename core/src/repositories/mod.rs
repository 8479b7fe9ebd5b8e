//! Repository interfaces for data access abstraction, with process-local
//! implementations used by tests and the in-memory storage backend.

pub mod account;
pub mod answer;
pub mod question;
pub mod survey;
pub mod verification_token;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use answer::{AnswerRepository, InMemoryAnswerRepository};
pub use question::{InMemoryQuestionRepository, QuestionRepository};
pub use survey::{InMemorySurveyRepository, SurveyRepository};
pub use verification_token::{InMemoryVerificationTokenRepository, VerificationTokenRepository};
