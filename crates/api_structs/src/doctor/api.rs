use crate::dtos::DoctorDTO;
use docbook_domain::{Doctor, Schedule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorResponse {
    pub doctor: DoctorDTO,
}

impl DoctorResponse {
    pub fn new(doctor: Doctor) -> Self {
        Self {
            doctor: DoctorDTO::new(doctor),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorsResponse {
    pub doctors: Vec<DoctorDTO>,
}

impl DoctorsResponse {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self {
            doctors: doctors.into_iter().map(DoctorDTO::new).collect(),
        }
    }
}

pub mod create_doctor {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub specialization: String,
        /// Defaults to monday to friday 09:00 - 17:00
        #[serde(default)]
        pub schedule: Option<Schedule>,
    }

    pub type APIResponse = DoctorResponse;
}

pub mod get_doctors {
    use super::*;

    pub type APIResponse = DoctorsResponse;
}

pub mod get_doctor {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub doctor_id: String,
    }

    pub type APIResponse = DoctorResponse;
}

pub mod get_doctors_by_specialization {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub specialization: String,
    }

    pub type APIResponse = DoctorsResponse;
}

pub mod get_specializations {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub specializations: Vec<String>,
    }
}

pub mod update_doctor {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub specialization: Option<String>,
        #[serde(default)]
        pub schedule: Option<Schedule>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub doctor_id: String,
    }

    pub type APIResponse = DoctorResponse;
}

pub mod delete_doctor {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub doctor_id: String,
    }

    pub type APIResponse = DoctorResponse;
}
