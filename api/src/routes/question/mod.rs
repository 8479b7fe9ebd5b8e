pub mod create;

use actix_web::web;

use crate::state::ServiceBundle;

pub fn configure<B: ServiceBundle>(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-question", web::post().to(create::create_question::<B>));
}
