use actix_web::{web, HttpResponse};
use survey_shared::ApiResponse;

use crate::handlers::ApiError;
use crate::state::{AppState, ServiceBundle};

/// Handler for GET /api/v1/survey/get-survey/{slug}
pub async fn get_survey<B: ServiceBundle>(
    state: web::Data<AppState<B>>,
    slug: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let survey = state.surveys.get_survey(&slug).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Survey successfully retrieved", survey)))
}
