use actix_web::{web, HttpResponse};
use survey_shared::ApiResponse;

use crate::dto::auth::ForgotPasswordRequest;
use crate::dto::RequestRules;
use crate::handlers::ApiError;
use crate::state::{AppState, ServiceBundle};

/// Handler for POST /api/v1/auth/forgot-password
pub async fn forgot_password<B: ServiceBundle>(
    state: web::Data<AppState<B>>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    request.check()?;

    state
        .auth
        .forgot_password(request.email.as_deref().unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Password reset link has been sent to your email",
    )))
}
