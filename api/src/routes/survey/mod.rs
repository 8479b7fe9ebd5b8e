//! Survey route handlers

pub mod create;
pub mod get;
pub mod get_responses;
pub mod response;

use actix_web::web;

use crate::state::ServiceBundle;

pub fn configure<B: ServiceBundle>(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-survey", web::post().to(create::create_survey::<B>))
        .route("/get-survey/{slug}", web::get().to(get::get_survey::<B>))
        .route("/response", web::post().to(response::respond::<B>))
        .route("/get-responses", web::get().to(get_responses::get_responses::<B>));
}
