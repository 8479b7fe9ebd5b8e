use actix_web::{web, HttpResponse};
use survey_shared::ApiResponse;

use crate::dto::auth::{ResetPasswordRequest, ResetPasswordResponse};
use crate::dto::RequestRules;
use crate::handlers::ApiError;
use crate::state::{AppState, ServiceBundle};

/// Handler for PATCH /api/v1/auth/reset-password/{token}
pub async fn reset_password<B: ServiceBundle>(
    state: web::Data<AppState<B>>,
    token: web::Path<String>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    request.check()?;

    let grant = state
        .auth
        .reset_password(
            &token,
            request.password.as_deref().unwrap_or_default(),
            request.confirm_password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Password successfully reset",
        ResetPasswordResponse {
            token: grant.token,
            company_data: grant.account,
        },
    )))
}
