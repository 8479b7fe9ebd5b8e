use actix_web::{web, HttpRequest, HttpResponse};
use survey_shared::ApiResponse;

use crate::dto::survey::CreateQuestionRequest;
use crate::dto::RequestRules;
use crate::handlers::ApiError;
use crate::middleware::authenticate;
use crate::state::{AppState, ServiceBundle};

/// Handler for POST /api/v1/question/create-question
pub async fn create_question<B: ServiceBundle>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    request: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse, ApiError> {
    let owner = authenticate(&req, request.authorization.as_deref())?;
    request.check()?;
    let survey_id = request.survey_id()?;

    let question = state
        .surveys
        .create_question(owner, survey_id, request.question.as_deref().unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Successfully created question", question)))
}
