use super::{sort_appointments, AppointmentStoreError, IAppointmentRepo};
use crate::repos::shared::inmemory_repo::*;
use docbook_domain::{Appointment, AppointmentChanges, AppointmentStatus, Doctor, ID};
use std::sync::{Arc, Mutex};

/// Appointments are checked and written while holding the lock of the
/// collection. When both locks are needed `appointments` is locked
/// before `doctors`.
pub struct InMemoryAppointmentRepo {
    appointments: Arc<Mutex<Vec<Appointment>>>,
    doctors: Arc<Mutex<Vec<Doctor>>>,
}

impl InMemoryAppointmentRepo {
    pub fn new(
        appointments: Arc<Mutex<Vec<Appointment>>>,
        doctors: Arc<Mutex<Vec<Doctor>>>,
    ) -> Self {
        Self {
            appointments,
            doctors,
        }
    }

    fn find_sorted<F: FnMut(&Appointment) -> bool>(&self, compare: F) -> Vec<Appointment> {
        let mut appointments = find_by(&self.appointments, compare);
        sort_appointments(&mut appointments);
        appointments
    }
}

fn first_conflict<'a>(
    appointments: &'a [Appointment],
    appointment: &Appointment,
) -> Option<&'a Appointment> {
    appointments
        .iter()
        .find(|existing| appointment.conflicts_with(existing))
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn reserve(&self, appointment: &Appointment) -> Result<(), AppointmentStoreError> {
        let mut appointments = lock(&self.appointments);
        let doctor_exists = lock(&self.doctors)
            .iter()
            .any(|d| d.id == appointment.doctor_id);
        if !doctor_exists {
            return Err(AppointmentStoreError::DoctorNotFound(
                appointment.doctor_id.clone(),
            ));
        }
        if appointments.iter().any(|a| a.id == appointment.id) {
            return Ok(());
        }
        if let Some(existing) = first_conflict(&appointments, appointment) {
            return Err(AppointmentStoreError::Conflict(Some(existing.id.clone())));
        }
        appointments.push(appointment.clone());
        Ok(())
    }

    async fn update(
        &self,
        appointment_id: &ID,
        changes: &AppointmentChanges,
    ) -> Result<Appointment, AppointmentStoreError> {
        let mut appointments = lock(&self.appointments);
        let index = appointments
            .iter()
            .position(|a| a.id == *appointment_id)
            .ok_or_else(|| AppointmentStoreError::AppointmentNotFound(appointment_id.clone()))?;

        let updated = changes
            .apply(&appointments[index])
            .map_err(AppointmentStoreError::InvalidStatusChange)?;

        if let Some(existing) = first_conflict(&appointments, &updated) {
            return Err(AppointmentStoreError::Conflict(Some(existing.id.clone())));
        }
        appointments[index] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>> {
        Ok(delete(appointment_id, &self.appointments))
    }

    async fn find(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>> {
        Ok(find(appointment_id, &self.appointments))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Appointment>> {
        Ok(self.find_sorted(|_| true))
    }

    async fn find_by_doctor(&self, doctor_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        Ok(self.find_sorted(|a| a.doctor_id == *doctor_id))
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        Ok(self.find_sorted(|a| a.user_id == *user_id))
    }

    async fn find_booked_by_doctor(&self, doctor_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        Ok(self.find_sorted(|a| {
            a.doctor_id == *doctor_id && a.status == AppointmentStatus::Scheduled
        }))
    }

    async fn find_booked_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        Ok(self.find_sorted(|a| a.user_id == *user_id && a.status == AppointmentStatus::Scheduled))
    }
}
