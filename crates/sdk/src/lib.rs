mod appointment;
mod auth;
mod base;
mod doctor;
mod status;
mod user;

use appointment::AppointmentClient;
use auth::AuthClient;
use doctor::DoctorClient;
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};

pub use appointment::{CreateAppointmentInput, UpdateAppointmentInput};
pub use auth::{SignInInput, SignUpInput};
pub use doctor::{CreateDoctorInput, UpdateDoctorInput};
pub use user::{CreateUserInput, UpdateUserInput};

// Domain
pub use docbook_api_structs::dtos::{AppointmentDTO, DoctorDTO, UserDTO};
pub use docbook_api_structs::{
    update_appointment::RequestBody as UpdateAppointmentBody,
    update_doctor::RequestBody as UpdateDoctorBody, update_user::RequestBody as UpdateUserBody,
};
pub use docbook_domain::{AppointmentStatus, Role, Schedule, Time, Weekday, ID};

/// Docbook SDK
///
/// The SDK contains methods for interacting with the Docbook server
/// API. Requests are authenticated with the session token given
/// to `DocbookSDK::with_token`.
#[derive(Clone)]
pub struct DocbookSDK {
    pub appointment: AppointmentClient,
    pub auth: AuthClient,
    pub doctor: DoctorClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl DocbookSDK {
    /// Client for the endpoints that do not require a signed in user
    pub fn new<T: Into<String>>(address: T) -> Self {
        Self::from_base(BaseClient::new(address.into()))
    }

    pub fn with_token<T: Into<String>, S: Into<String>>(address: T, token: S) -> Self {
        let mut base = BaseClient::new(address.into());
        base.set_token(token.into());
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let appointment = AppointmentClient::new(base.clone());
        let auth = AuthClient::new(base.clone());
        let doctor = DoctorClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            appointment,
            auth,
            doctor,
            status,
            user,
        }
    }
}
