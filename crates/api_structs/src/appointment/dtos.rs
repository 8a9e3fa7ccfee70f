use chrono::{DateTime, Utc};
use docbook_domain::{Appointment, AppointmentStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDTO {
    pub id: ID,
    pub doctor_id: ID,
    pub user_id: ID,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    /// Length of the appointment in minutes
    pub duration: i64,
    pub status: AppointmentStatus,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl AppointmentDTO {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            end_ts: appointment.end_time(),
            id: appointment.id,
            doctor_id: appointment.doctor_id,
            user_id: appointment.user_id,
            start_ts: appointment.start_time,
            duration: appointment.duration,
            status: appointment.status,
            created: appointment.created,
            updated: appointment.updated,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn json_format() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        let appointment = Appointment::new(ID::new(), ID::new(), start, 45, start);

        let json = serde_json::to_value(AppointmentDTO::new(appointment)).unwrap();
        assert_eq!(json["startTs"], "2024-03-04T10:00:00Z");
        assert_eq!(json["endTs"], "2024-03-04T10:45:00Z");
        assert_eq!(json["duration"], 45);
        assert_eq!(json["status"], "scheduled");
    }
}
