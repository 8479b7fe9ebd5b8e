use actix_web::{web, HttpResponse};
use survey_shared::{mask_email, ApiResponse};

use crate::dto::auth::VerificationRequest;
use crate::handlers::ApiError;
use crate::state::{AppState, ServiceBundle};

/// Handler for POST /api/v1/auth/verification
///
/// Emails a one-time code to the address and returns the stored token
/// record, code included as `token`.
pub async fn verification<B: ServiceBundle>(
    state: web::Data<AppState<B>>,
    request: web::Json<VerificationRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = request.into_inner().email.unwrap_or_default();
    tracing::info!(email = %mask_email(&email), "Processing verification request");

    let token = state.verification.request_verification(&email).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success("Code successfully sent", token)))
}
