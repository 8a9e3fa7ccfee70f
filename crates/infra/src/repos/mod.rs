mod appointment;
mod doctor;
mod shared;
mod user;

pub use appointment::{
    AppointmentStoreError, IAppointmentRepo, InMemoryAppointmentRepo, PostgresAppointmentRepo,
};
pub use doctor::{IDoctorRepo, InMemoryDoctorRepo, PostgresDoctorRepo};
use sqlx::PgPool;
use std::sync::{Arc, Mutex};
pub use user::{IUserRepo, InMemoryUserRepo, PostgresUserRepo, UserStoreError};

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub doctors: Arc<dyn IDoctorRepo>,
    pub appointments: Arc<dyn IAppointmentRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            doctors: Arc::new(PostgresDoctorRepo::new(pool.clone())),
            appointments: Arc::new(PostgresAppointmentRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        let doctors = Arc::new(Mutex::new(Vec::new()));
        let appointments = Arc::new(Mutex::new(Vec::new()));
        Self {
            users: Arc::new(InMemoryUserRepo::new(appointments.clone())),
            doctors: Arc::new(InMemoryDoctorRepo::new(
                doctors.clone(),
                appointments.clone(),
            )),
            appointments: Arc::new(InMemoryAppointmentRepo::new(appointments, doctors)),
        }
    }
}
