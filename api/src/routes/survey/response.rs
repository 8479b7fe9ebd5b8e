use actix_web::{web, HttpResponse};
use survey_shared::ApiResponse;

use crate::dto::survey::{answer_inputs, AnswerItem};
use crate::handlers::ApiError;
use crate::state::{AppState, ServiceBundle};

/// Handler for POST /api/v1/survey/response
///
/// The body is an array of `{question, answer}`; all answers are stored or none.
pub async fn respond<B: ServiceBundle>(
    state: web::Data<AppState<B>>,
    request: web::Json<Vec<AnswerItem>>,
) -> Result<HttpResponse, ApiError> {
    let inputs = answer_inputs(request.into_inner())?;
    let answers = state.surveys.respond(inputs).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Response successful", answers)))
}
