//! Translation of domain errors into HTTP responses
//!
//! | Kind            | Status |
//! |-----------------|--------|
//! | InvalidInput    | 400    |
//! | Conflict        | 409    |
//! | NotFound        | 404    |
//! | Unauthenticated | 401    |
//! | Expired         | 400    |
//! | Internal        | 500    |

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use survey_core::errors::{AuthError, DomainError, ErrorKind, SurveyError, TokenError};
use survey_shared::ApiResponse;

pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated! Please login.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Payload failed shape validation
    #[error("{0}")]
    Validation(String),

    #[error("Unauthenticated! Please login.")]
    Unauthenticated,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

macro_rules! from_domain {
    ($($source:ty),*) => {
        $(impl From<$source> for ApiError {
            fn from(error: $source) -> Self {
                ApiError::Domain(error.into())
            }
        })*
    };
}

from_domain!(AuthError, TokenError, SurveyError);

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(_) => ErrorKind::InvalidInput,
            ApiError::Unauthenticated => ErrorKind::Unauthenticated,
            ApiError::Domain(error) => error.kind(),
        }
    }

    /// Message safe to show to the client
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => INTERNAL_ERROR_MESSAGE.to_string(),
            ErrorKind::Unauthenticated => UNAUTHENTICATED_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput | ErrorKind::Expired => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, event = "request_failed", "Request failed with an internal error");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        HttpResponse::build(status).json(ApiResponse::error(self.public_message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(DomainError::from(AuthError::IncorrectPassword)), 400),
            (ApiError::from(DomainError::from(AuthError::CompanyAlreadyExists)), 409),
            (ApiError::from(DomainError::from(AuthError::AccountNotFound)), 404),
            (ApiError::from(DomainError::from(AuthError::VerificationTokenExpired)), 400),
            (ApiError::from(DomainError::from(SurveyError::SurveyNotFound)), 404),
            (ApiError::Unauthenticated, 401),
            (ApiError::Validation("\"name\" is required".into()), 400),
            (ApiError::from(DomainError::internal("pool timed out")), 500),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code().as_u16(), status, "{:?}", error);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = ApiError::from(DomainError::internal("connection refused to 10.0.0.3"));
        assert_eq!(error.public_message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_token_errors_share_one_message() {
        let error = ApiError::from(DomainError::from(TokenError::InvalidSignature));
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.public_message(), UNAUTHENTICATED_MESSAGE);
    }

    #[test]
    fn test_domain_message_passes_through() {
        let error = ApiError::from(DomainError::from(AuthError::AccountNotFound));
        assert_eq!(error.public_message(), "Sorry you do not have an account with us");
    }
}
