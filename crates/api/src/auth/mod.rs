mod sign_in;
mod sign_up;

use actix_web::web;
use sign_in::sign_in_controller;
use sign_up::sign_up_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/signup", web::post().to(sign_up_controller));
    cfg.route("/auth/signin", web::post().to(sign_in_controller));
}
