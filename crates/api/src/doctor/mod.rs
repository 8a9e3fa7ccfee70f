mod create_doctor;
mod delete_doctor;
mod get_doctor;
mod get_doctors;
mod get_doctors_by_specialization;
mod get_specializations;
mod update_doctor;

use actix_web::web;
use create_doctor::create_doctor_controller;
use delete_doctor::delete_doctor_controller;
use get_doctor::get_doctor_controller;
use get_doctors::get_doctors_controller;
use get_doctors_by_specialization::get_doctors_by_specialization_controller;
use get_specializations::get_specializations_controller;
use update_doctor::update_doctor_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/doctors", web::post().to(create_doctor_controller));
    cfg.route("/doctors", web::get().to(get_doctors_controller));
    // Registered before `/doctors/{doctor_id}` so they are not parsed as ids
    cfg.route(
        "/doctors/specializations",
        web::get().to(get_specializations_controller),
    );
    cfg.route(
        "/doctors/specialization/{specialization}",
        web::get().to(get_doctors_by_specialization_controller),
    );
    cfg.route("/doctors/{doctor_id}", web::get().to(get_doctor_controller));
    cfg.route("/doctors/{doctor_id}", web::put().to(update_doctor_controller));
    cfg.route(
        "/doctors/{doctor_id}",
        web::delete().to(delete_doctor_controller),
    );
}
