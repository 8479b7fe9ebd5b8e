use actix_web::{web, HttpResponse};
use survey_shared::ApiResponse;

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::dto::RequestRules;
use crate::handlers::ApiError;
use crate::state::{AppState, ServiceBundle};

/// Handler for POST /api/v1/auth/login
pub async fn login<B: ServiceBundle>(
    state: web::Data<AppState<B>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    request.check()?;

    let email = request.email.as_deref().unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();
    let grant = state.auth.login(email, password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Company successfully logged in",
        LoginResponse {
            token: grant.token,
            user_data: grant.account,
        },
    )))
}
