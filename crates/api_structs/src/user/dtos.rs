use chrono::{DateTime, Utc};
use docbook_domain::{Role, User, ID};
use serde::{Deserialize, Serialize};

/// The public view of a `User`, credentials are never exposed
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            created: user.created,
            updated: user.updated,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn does_not_expose_credentials() {
        let mut user = User::new(
            "Jane Doe".into(),
            "jane@example.com",
            "$argon2id$v=19$secret".into(),
            Role::User,
            Utc::now(),
        );
        user.token = Some("token".into());

        let json = serde_json::to_value(UserDTO::new(user)).unwrap();
        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(json["role"], "user");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("token").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
