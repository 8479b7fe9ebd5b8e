use actix_web::{web, HttpResponse};
use survey_shared::ApiResponse;

use crate::dto::auth::SignUpRequest;
use crate::dto::RequestRules;
use crate::handlers::ApiError;
use crate::state::{AppState, ServiceBundle};

/// Handler for POST /api/v1/auth/signup
pub async fn signup<B: ServiceBundle>(
    state: web::Data<AppState<B>>,
    request: web::Json<SignUpRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.check()?;

    let (fields, code) = request.into_parts();
    let account = state.verification.sign_up(fields, &code).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Company successfully signed up", account)))
}
