mod inmemory;
mod postgres;

use docbook_domain::{Appointment, AppointmentChanges, InvalidStatusChangeError, ID};
pub use inmemory::InMemoryAppointmentRepo;
pub use postgres::PostgresAppointmentRepo;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppointmentStoreError {
    #[error("The requested time overlaps an existing appointment")]
    Conflict(Option<ID>),
    #[error("The doctor with id: {0} was not found")]
    DoctorNotFound(ID),
    #[error("The appointment with id: {0} was not found")]
    AppointmentNotFound(ID),
    #[error(transparent)]
    InvalidStatusChange(InvalidStatusChangeError),
    #[error("The store is temporarily unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Storage of `Appointment`s.
///
/// Writes go through `reserve` and `update` which guarantee that no two
/// active appointments of the same doctor overlap, also when called
/// concurrently. Reads are ordered by start time and then id.
#[async_trait::async_trait]
pub trait IAppointmentRepo: Send + Sync {
    /// Stores a new `Appointment` unless an active appointment of the same
    /// doctor overlaps it. Reserving an `Appointment` that is already stored
    /// succeeds without changing it, so a retry after a commit that went
    /// through is not an error.
    async fn reserve(&self, appointment: &Appointment) -> Result<(), AppointmentStoreError>;
    /// Applies the changes to the stored `Appointment` unless that makes it
    /// overlap another active appointment of the same doctor. Reading,
    /// checking and writing happen under the same lock, so concurrent
    /// changes to other fields are kept.
    async fn update(
        &self,
        appointment_id: &ID,
        changes: &AppointmentChanges,
    ) -> Result<Appointment, AppointmentStoreError>;
    async fn delete(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>>;
    async fn find(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Appointment>>;
    async fn find_by_doctor(&self, doctor_id: &ID) -> anyhow::Result<Vec<Appointment>>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>>;
    /// Appointments of the doctor that are still `scheduled`
    async fn find_booked_by_doctor(&self, doctor_id: &ID) -> anyhow::Result<Vec<Appointment>>;
    /// Appointments of the user that are still `scheduled`
    async fn find_booked_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>>;
}

fn sort_appointments(appointments: &mut [Appointment]) {
    appointments.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.id.cmp(&b.id))
    });
}
