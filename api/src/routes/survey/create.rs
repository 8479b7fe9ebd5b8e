use actix_web::{web, HttpRequest, HttpResponse};
use survey_shared::ApiResponse;

use crate::dto::survey::CreateSurveyRequest;
use crate::handlers::ApiError;
use crate::middleware::authenticate;
use crate::state::{AppState, ServiceBundle};

/// Handler for POST /api/v1/survey/create-survey
///
/// Responds with the public URL of the new survey.
pub async fn create_survey<B: ServiceBundle>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    request: web::Json<CreateSurveyRequest>,
) -> Result<HttpResponse, ApiError> {
    let owner = authenticate(&req, request.authorization.as_deref())?;

    let survey = state
        .surveys
        .create_survey(owner, request.title.as_deref().unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Survey url successfully created",
        state.surveys.survey_url(&survey),
    )))
}
