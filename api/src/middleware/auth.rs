//! Session authentication
//!
//! The token is read from the `authorization` header, either raw or as
//! `Bearer <token>`. JSON routes may also carry it in an `authorization` body
//! field. Every failure yields the same 401 response.

use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use survey_core::services::SessionTokenService;
use uuid::Uuid;

use crate::handlers::ApiError;

/// Token from the `authorization` header, `Bearer ` prefix removed
pub fn header_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim();

    (!token.is_empty()).then(|| token.to_string())
}

/// Resolve the calling account from the header, falling back to `body_token`
pub fn authenticate(req: &HttpRequest, body_token: Option<&str>) -> Result<Uuid, ApiError> {
    let sessions = req
        .app_data::<web::Data<Arc<SessionTokenService>>>()
        .ok_or_else(|| {
            tracing::error!("Session token service not registered as app data");
            ApiError::Unauthenticated
        })?;

    let token = header_token(req)
        .or_else(|| {
            body_token
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| token.strip_prefix("Bearer ").unwrap_or(token).to_string())
        })
        .ok_or(ApiError::Unauthenticated)?;

    sessions.account_id(&token).map_err(|e| {
        tracing::debug!(error = %e, event = "session_rejected", "Rejected session token");
        ApiError::Unauthenticated
    })
}

/// Extractor for routes that only accept the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedAccount(pub Uuid);

impl FromRequest for AuthenticatedAccount {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req, None).map(AuthenticatedAccount))
    }
}
