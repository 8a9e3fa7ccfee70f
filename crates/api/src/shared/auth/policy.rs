use docbook_domain::Role;
use serde::{Deserialize, Serialize};

/// A Policy decides which actions a caller can and cannot take.
///
/// The `Policy` is derived from the `Role` of the signed in `User`. Every
/// `UseCase` with a `PermissionBoundary` contains a list of `Permission`s
/// that is required to execute it, if the `Policy` does not authorize
/// some of these `Permission`s the request will be rejected.
///
/// Ownership of single resources, like an `Appointment` belonging to
/// the caller, is checked by the `UseCase`s themselves.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Policy {
    /// `Permission`s allowed by the `Policy`
    allow: Option<Vec<Permission>>,
    /// `Permission`s rejected by the `Policy`
    reject: Option<Vec<Permission>>,
}

impl Policy {
    pub fn for_role(role: Role) -> Self {
        let allow = match role {
            Role::Admin => vec![Permission::All],
            Role::User => vec![
                Permission::CreateAppointment,
                Permission::UpdateAppointment,
                Permission::CancelAppointment,
                Permission::DeleteAppointment,
                Permission::UpdateUser,
                Permission::DeleteUser,
            ],
        };
        Self {
            allow: Some(allow),
            reject: None,
        }
    }

    /// Checks if this `Policy` has the right to list of `Permission`s
    pub fn authorize(&self, permissions: &[Permission]) -> bool {
        if permissions.is_empty() {
            return true;
        }

        if let Some(rejected) = &self.reject {
            for rejected_permission in rejected {
                if *rejected_permission == Permission::All {
                    return false;
                }
                if permissions.contains(rejected_permission) {
                    return false;
                }
            }
        }

        if let Some(allowed) = &self.allow {
            if allowed.contains(&Permission::All) {
                return true;
            }

            return permissions
                .iter()
                .all(|permission| allowed.contains(permission));
        }

        false
    }
}

/// `Permission` are different kind of actions that can be performed.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum Permission {
    #[serde(rename = "*")]
    All,
    CreateAppointment,
    UpdateAppointment,
    CancelAppointment,
    DeleteAppointment,
    /// Listing appointments of every user
    ListAppointments,
    CompleteAppointment,
    CreateDoctor,
    UpdateDoctor,
    DeleteDoctor,
    CreateUser,
    ListUsers,
    UpdateUser,
    UpdateUserRole,
    DeleteUser,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn permissions() {
        let policy = Policy::default();
        assert!(policy.authorize(&Vec::new()));
        assert!(!policy.authorize(&vec![Permission::CreateAppointment]));

        let policy = Policy {
            allow: Some(vec![Permission::All]),
            reject: None,
        };
        assert!(policy.authorize(&vec![Permission::CreateDoctor]));

        let policy = Policy {
            allow: Some(vec![Permission::All]),
            reject: Some(vec![Permission::CreateDoctor]),
        };
        assert!(!policy.authorize(&vec![Permission::CreateDoctor]));

        let policy = Policy {
            allow: Some(vec![Permission::CreateAppointment]),
            reject: Some(vec![Permission::All]),
        };
        assert!(!policy.authorize(&vec![Permission::CreateAppointment]));

        let policy = Policy {
            allow: Some(vec![
                Permission::CreateAppointment,
                Permission::UpdateAppointment,
            ]),
            reject: Some(vec![Permission::UpdateAppointment]),
        };
        assert!(policy.authorize(&vec![Permission::CreateAppointment]));
        assert!(!policy.authorize(&vec![
            Permission::CreateAppointment,
            Permission::UpdateAppointment
        ]));
    }

    #[test]
    fn role_policies() {
        let admin = Policy::for_role(Role::Admin);
        assert!(admin.authorize(&vec![Permission::CreateDoctor]));
        assert!(admin.authorize(&vec![Permission::ListUsers, Permission::DeleteUser]));

        let user = Policy::for_role(Role::User);
        assert!(user.authorize(&vec![Permission::CreateAppointment]));
        assert!(user.authorize(&vec![Permission::CancelAppointment]));
        assert!(!user.authorize(&vec![Permission::CreateDoctor]));
        assert!(!user.authorize(&vec![Permission::ListAppointments]));
        assert!(!user.authorize(&vec![Permission::CompleteAppointment]));
        assert!(!user.authorize(&vec![Permission::UpdateUserRole]));
    }
}
