use chrono::{DateTime, TimeZone, Utc};
use docbook_sdk::{CreateDoctorInput, DocbookSDK, DoctorDTO, ID};

pub const PASSWORD: &str = "correct horse battery";

pub fn unique_email() -> String {
    format!("{}@docbook.test", ID::new())
}

/// 2030-01-07 is a monday
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 7, hour, minute, 0).unwrap()
}

pub async fn create_doctor(admin: &DocbookSDK, specialization: &str) -> DoctorDTO {
    admin
        .doctor
        .create(CreateDoctorInput {
            name: "Dr. Test".into(),
            specialization: specialization.into(),
            schedule: None,
        })
        .await
        .expect("Expected to create doctor")
        .doctor
}
