mod cancel_appointment;
mod create_appointment;
mod delete_appointment;
mod get_appointment;
mod get_appointments;
mod get_appointments_by_doctor;
mod get_appointments_by_user;
mod get_booked_appointments_by_doctor;
mod get_booked_appointments_by_user;
mod update_appointment;

use actix_web::web;
use cancel_appointment::cancel_appointment_controller;
use create_appointment::create_appointment_controller;
use delete_appointment::delete_appointment_controller;
use docbook_domain::Appointment;
use docbook_infra::DocbookContext;
use get_appointment::get_appointment_controller;
use get_appointments::get_appointments_controller;
use get_appointments_by_doctor::get_appointments_by_doctor_controller;
use get_appointments_by_user::get_appointments_by_user_controller;
use get_booked_appointments_by_doctor::get_booked_appointments_by_doctor_controller;
use get_booked_appointments_by_user::get_booked_appointments_by_user_controller;
use update_appointment::update_appointment_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/appointments",
        web::post().to(create_appointment_controller),
    );
    cfg.route("/appointments", web::get().to(get_appointments_controller));
    cfg.route(
        "/appointments/doctor/{doctor_id}",
        web::get().to(get_appointments_by_doctor_controller),
    );
    cfg.route(
        "/appointments/doctor/{doctor_id}/booked",
        web::get().to(get_booked_appointments_by_doctor_controller),
    );
    cfg.route(
        "/appointments/user/{user_id}",
        web::get().to(get_appointments_by_user_controller),
    );
    cfg.route(
        "/appointments/user/{user_id}/booked",
        web::get().to(get_booked_appointments_by_user_controller),
    );
    cfg.route(
        "/appointments/{appointment_id}",
        web::get().to(get_appointment_controller),
    );
    cfg.route(
        "/appointments/{appointment_id}",
        web::put().to(update_appointment_controller),
    );
    cfg.route(
        "/appointments/{appointment_id}",
        web::delete().to(delete_appointment_controller),
    );
    cfg.route(
        "/appointments/{appointment_id}/cancel",
        web::post().to(cancel_appointment_controller),
    );
}

enum WorkingHours {
    Covered,
    Outside,
    UnknownDoctor,
}

/// Checks the `Appointment` against the schedule of its doctor. Always
/// `Covered` unless working hours are enforced.
async fn check_working_hours(
    appointment: &Appointment,
    ctx: &DocbookContext,
) -> anyhow::Result<WorkingHours> {
    if !ctx.config.enforce_working_hours {
        return Ok(WorkingHours::Covered);
    }
    let res = match ctx.repos.doctors.find(&appointment.doctor_id).await? {
        Some(doctor) if doctor.schedule.covers(&appointment.span()) => WorkingHours::Covered,
        Some(_) => WorkingHours::Outside,
        None => WorkingHours::UnknownDoctor,
    };
    Ok(res)
}
