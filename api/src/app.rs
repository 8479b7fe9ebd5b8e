//! Application factory

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use survey_shared::config::CorsConfig;
use survey_shared::ApiResponse;

use crate::handlers::ApiError;
use crate::middleware::create_cors;
use crate::routes::{self, health::health_check};
use crate::state::{AppState, ServiceBundle};

/// Malformed JSON bodies are answered with the standard envelope
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        ApiError::Validation(err.to_string()).into()
    })
}

/// Create and configure the application with all dependencies
pub fn create_app<B: ServiceBundle>(
    state: web::Data<AppState<B>>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let sessions = web::Data::new(state.sessions.clone());

    App::new()
        .app_data(state)
        .app_data(sessions)
        .app_data(json_config())
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(routes::configure::<B>))
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(ApiResponse::error(
                "The requested resource was not found",
            ))
        }))
}
