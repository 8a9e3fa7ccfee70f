use crate::dtos::AppointmentDTO;
use chrono::{DateTime, Utc};
use docbook_domain::{Appointment, AppointmentStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentResponse {
    pub appointment: AppointmentDTO,
}

impl AppointmentResponse {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            appointment: AppointmentDTO::new(appointment),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentDTO>,
}

impl AppointmentsResponse {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: appointments.into_iter().map(AppointmentDTO::new).collect(),
        }
    }
}

pub mod create_appointment {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub doctor_id: String,
        /// Admins can book on behalf of other users, defaults to the caller
        #[serde(default)]
        pub user_id: Option<String>,
        #[serde(default)]
        pub start_ts: Option<DateTime<Utc>>,
        /// Length of the appointment in minutes
        #[serde(default)]
        pub duration: Option<i64>,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod get_appointment {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub appointment_id: String,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod get_appointments {
    use super::*;

    pub type APIResponse = AppointmentsResponse;
}

pub mod get_appointments_by_doctor {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub doctor_id: String,
    }

    pub type APIResponse = AppointmentsResponse;
}

pub mod get_booked_appointments_by_doctor {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub doctor_id: String,
    }

    pub type APIResponse = AppointmentsResponse;
}

pub mod get_appointments_by_user {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub user_id: String,
    }

    pub type APIResponse = AppointmentsResponse;
}

pub mod get_booked_appointments_by_user {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub user_id: String,
    }

    pub type APIResponse = AppointmentsResponse;
}

pub mod update_appointment {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub start_ts: Option<DateTime<Utc>>,
        #[serde(default)]
        pub duration: Option<i64>,
        #[serde(default)]
        pub status: Option<AppointmentStatus>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub appointment_id: String,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod cancel_appointment {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub appointment_id: String,
    }

    pub type APIResponse = AppointmentResponse;
}

pub mod delete_appointment {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub appointment_id: String,
    }

    pub type APIResponse = AppointmentResponse;
}
