mod appointment;
mod doctor;
mod shared;
mod timespan;
mod user;

pub use appointment::{
    Appointment, AppointmentChanges, AppointmentStatus, InvalidAppointmentStatusError,
    InvalidStatusChangeError, MAX_APPOINTMENT_DURATION, MAX_APPOINTMENT_YEAR,
    MIN_APPOINTMENT_YEAR,
};
pub use chrono::Weekday;
pub use doctor::{Doctor, InvalidScheduleError, Schedule, Time};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use timespan::TimeSpan;
pub use user::{Caller, InvalidRoleError, Role, User};
