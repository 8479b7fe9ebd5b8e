//! Authentication route handlers
//!
//! - email verification code and company sign-up
//! - login
//! - forgotten password and reset

pub mod forgot_password;
pub mod login;
pub mod reset_password;
pub mod signup;
pub mod verification;

use actix_web::web;

use crate::state::ServiceBundle;

pub fn configure<B: ServiceBundle>(cfg: &mut web::ServiceConfig) {
    cfg.route("/verification", web::post().to(verification::verification::<B>))
        .route("/signup", web::post().to(signup::signup::<B>))
        .route("/login", web::post().to(login::login::<B>))
        .route("/forgot-password", web::post().to(forgot_password::forgot_password::<B>))
        .route(
            "/reset-password/{token}",
            web::patch().to(reset_password::reset_password::<B>),
        );
}
