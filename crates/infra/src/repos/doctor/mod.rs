mod inmemory;
mod postgres;

use docbook_domain::{Doctor, ID};
pub use inmemory::InMemoryDoctorRepo;
pub use postgres::PostgresDoctorRepo;

#[async_trait::async_trait]
pub trait IDoctorRepo: Send + Sync {
    async fn insert(&self, doctor: &Doctor) -> anyhow::Result<()>;
    async fn save(&self, doctor: &Doctor) -> anyhow::Result<()>;
    /// Removes the `Doctor` together with all of its `Appointment`s
    async fn delete(&self, doctor_id: &ID) -> anyhow::Result<Option<Doctor>>;
    async fn find(&self, doctor_id: &ID) -> anyhow::Result<Option<Doctor>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Doctor>>;
    /// Case insensitive exact match on the specialization
    async fn find_by_specialization(&self, specialization: &str) -> anyhow::Result<Vec<Doctor>>;
    /// Distinct specializations in alphabetical order
    async fn list_specializations(&self) -> anyhow::Result<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context;
    use chrono::Utc;
    use docbook_domain::{Doctor, Schedule, ID};

    fn doctor(specialization: &str) -> Doctor {
        Doctor::new(
            "Dr. Test".into(),
            specialization.into(),
            Schedule::default(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn crud() {
        let ctx = setup_context().await.expect("To setup context");

        let mut doctor = doctor("Cardiology");
        ctx.repos
            .doctors
            .insert(&doctor)
            .await
            .expect("To insert doctor");

        let found = ctx
            .repos
            .doctors
            .find(&doctor.id)
            .await
            .expect("To query doctor")
            .expect("To find doctor");
        assert_eq!(found.name, doctor.name);
        assert_eq!(found.specialization, doctor.specialization);
        assert_eq!(found.schedule, doctor.schedule);

        doctor.name = "Dr. Renamed".into();
        ctx.repos.doctors.save(&doctor).await.expect("To save doctor");
        let found = ctx.repos.doctors.find(&doctor.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Dr. Renamed");

        let all = ctx.repos.doctors.find_all().await.unwrap();
        assert!(all.iter().any(|d| d.id == doctor.id));

        let deleted = ctx.repos.doctors.delete(&doctor.id).await.unwrap();
        assert_eq!(deleted.map(|d| d.id), Some(doctor.id.clone()));
        assert!(ctx.repos.doctors.find(&doctor.id).await.unwrap().is_none());
        assert!(ctx.repos.doctors.find(&ID::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn queries_by_specialization() {
        let ctx = setup_context().await.expect("To setup context");

        // Unique so that tests sharing a database do not interfere
        let specialization = format!("Dermatology {}", ID::new());
        let a = doctor(&specialization);
        let b = doctor(&specialization.to_uppercase());
        let c = doctor("Pediatrics");
        for d in [&a, &b, &c] {
            ctx.repos.doctors.insert(d).await.expect("To insert doctor");
        }

        let found = ctx
            .repos
            .doctors
            .find_by_specialization(&specialization.to_lowercase())
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|d| d.id == a.id || d.id == b.id));

        let specializations = ctx.repos.doctors.list_specializations().await.unwrap();
        assert!(specializations.contains(&specialization));
        assert!(specializations.contains(&"Pediatrics".to_string()));
        let mut sorted = specializations.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, specializations);
    }
}
