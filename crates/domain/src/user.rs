use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use docbook_utils::normalize_email;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid role: {0}")]
pub struct InvalidRoleError(pub String);

impl FromStr for Role {
    type Err = InvalidRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(InvalidRoleError(s.to_string())),
        }
    }
}

/// A registered patient or administrator.
///
/// The password is only ever kept as a PHC hash string and the
/// `token` is the last session token issued to the `User`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub token: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl User {
    pub fn new(
        full_name: String,
        email: &str,
        password_hash: String,
        role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            full_name,
            email: normalize_email(email),
            phone: None,
            password_hash,
            role,
            token: None,
            created: now,
            updated: now,
        }
    }

    pub fn caller(&self) -> Caller {
        Caller {
            id: self.id.clone(),
            role: self.role,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Identity of whoever is executing a request
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub id: ID,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins can act on every resource, users only on their own
    pub fn can_act_for(&self, owner_id: &ID) -> bool {
        self.is_admin() || self.id == *owner_id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalizes_email_on_creation() {
        let user = User::new(
            "Jane Doe".into(),
            " Jane@Example.com",
            "hash".into(),
            Role::User,
            Utc::now(),
        );
        assert_eq!(user.email, "jane@example.com");
        assert!(user.token.is_none());
    }

    #[test]
    fn callers_act_for_themselves() {
        let user = Caller {
            id: ID::new(),
            role: Role::User,
        };
        let admin = Caller {
            id: ID::new(),
            role: Role::Admin,
        };
        let other = ID::new();

        assert!(user.can_act_for(&user.id));
        assert!(!user.can_act_for(&other));
        assert!(admin.can_act_for(&other));
        assert!(admin.is_admin());
        assert!(!user.is_admin());
    }

    #[test]
    fn parses_roles() {
        assert_eq!("admin".parse(), Ok(Role::Admin));
        assert_eq!("User".parse(), Ok(Role::User));
        assert!("root".parse::<Role>().is_err());
    }
}
