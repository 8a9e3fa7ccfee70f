use crate::dtos::UserDTO;
use docbook_domain::User;
use serde::{Deserialize, Serialize};

/// A signed in `User` together with its session token
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserDTO,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            user: UserDTO::new(user),
            token,
        }
    }
}

pub mod sign_up {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub full_name: String,
        pub email: String,
        pub password: String,
        #[serde(default)]
        pub phone: Option<String>,
        /// Registers the user as an admin when it matches the configured code
        #[serde(default)]
        pub admin_secret_code: Option<String>,
    }

    pub type APIResponse = AuthResponse;
}

pub mod sign_in {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        pub password: String,
    }

    pub type APIResponse = AuthResponse;
}
