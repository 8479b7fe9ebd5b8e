//! Business services containing the workflows behind each endpoint.

pub mod auth;
pub mod notification;
pub mod password;
pub mod session;
pub mod survey;
pub mod verification;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthService, AuthServiceConfig, SessionGrant};
pub use notification::{EmailMessage, Notifier};
pub use session::{SessionTokenConfig, SessionTokenService};
pub use survey::{
    AnswerInput, QuestionResponses, SurveyResponses, SurveyService, SurveyServiceConfig,
    SurveyWithQuestions,
};
pub use verification::{VerificationService, VerificationServiceConfig};
