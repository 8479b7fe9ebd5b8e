//! HTTP routes mounted under `/api/v1`

pub mod auth;
pub mod health;
pub mod question;
pub mod survey;

use actix_web::web;

use crate::state::ServiceBundle;

pub fn configure<B: ServiceBundle>(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").configure(auth::configure::<B>))
        .service(web::scope("/survey").configure(survey::configure::<B>))
        .service(web::scope("/question").configure(question::configure::<B>));
}
