use chrono::{DateTime, Utc};
use docbook_domain::{Doctor, Schedule, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDTO {
    pub id: ID,
    pub name: String,
    pub specialization: String,
    pub schedule: Schedule,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl DoctorDTO {
    pub fn new(doctor: Doctor) -> Self {
        Self {
            id: doctor.id,
            name: doctor.name,
            specialization: doctor.specialization,
            schedule: doctor.schedule,
            created: doctor.created,
            updated: doctor.updated,
        }
    }
}
