use actix_web::{web, HttpResponse};
use survey_shared::ApiResponse;

use crate::dto::survey::ResponsesQuery;
use crate::handlers::ApiError;
use crate::middleware::AuthenticatedAccount;
use crate::state::{AppState, ServiceBundle};

/// Handler for GET /api/v1/survey/get-responses[?slug=...]
pub async fn get_responses<B: ServiceBundle>(
    account: AuthenticatedAccount,
    state: web::Data<AppState<B>>,
    query: web::Query<ResponsesQuery>,
) -> Result<HttpResponse, ApiError> {
    let slug = query.slug.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let responses = state.surveys.get_responses(account.0, slug).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Responses successfully retrieved", responses)))
}
