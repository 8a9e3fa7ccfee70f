use super::IDoctorRepo;
use crate::repos::shared::inmemory_repo::*;
use docbook_domain::{Appointment, Doctor, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryDoctorRepo {
    doctors: Arc<Mutex<Vec<Doctor>>>,
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl InMemoryDoctorRepo {
    pub fn new(
        doctors: Arc<Mutex<Vec<Doctor>>>,
        appointments: Arc<Mutex<Vec<Appointment>>>,
    ) -> Self {
        Self {
            doctors,
            appointments,
        }
    }
}

#[async_trait::async_trait]
impl IDoctorRepo for InMemoryDoctorRepo {
    async fn insert(&self, doctor: &Doctor) -> anyhow::Result<()> {
        insert(doctor, &self.doctors);
        Ok(())
    }

    async fn save(&self, doctor: &Doctor) -> anyhow::Result<()> {
        save(doctor, &self.doctors);
        Ok(())
    }

    async fn delete(&self, doctor_id: &ID) -> anyhow::Result<Option<Doctor>> {
        // Same lock order as the appointment repo: appointments first
        let mut appointments = lock(&self.appointments);
        let deleted = delete(doctor_id, &self.doctors);
        if deleted.is_some() {
            delete_by(&mut appointments, |a| a.doctor_id == *doctor_id);
        }
        Ok(deleted)
    }

    async fn find(&self, doctor_id: &ID) -> anyhow::Result<Option<Doctor>> {
        Ok(find(doctor_id, &self.doctors))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Doctor>> {
        let mut doctors = find_by(&self.doctors, |_| true);
        doctors.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(doctors)
    }

    async fn find_by_specialization(&self, specialization: &str) -> anyhow::Result<Vec<Doctor>> {
        let specialization = specialization.trim().to_lowercase();
        let mut doctors = find_by(&self.doctors, |d| {
            d.specialization.to_lowercase() == specialization
        });
        doctors.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(doctors)
    }

    async fn list_specializations(&self) -> anyhow::Result<Vec<String>> {
        let mut specializations = lock(&self.doctors)
            .iter()
            .map(|d| d.specialization.clone())
            .collect::<Vec<_>>();
        specializations.sort();
        specializations.dedup();
        Ok(specializations)
    }
}
