mod appointment;
mod auth;
mod doctor;
mod status;
mod user;

pub mod dtos {
    pub use crate::appointment::dtos::*;
    pub use crate::doctor::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::appointment::api::*;
pub use crate::auth::api::*;
pub use crate::doctor::api::*;
pub use crate::status::api::*;
pub use crate::user::api::*;
