use super::{IUserRepo, UserStoreError};
use crate::repos::shared::inmemory_repo::*;
use docbook_domain::{Appointment, User, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl InMemoryUserRepo {
    pub fn new(appointments: Arc<Mutex<Vec<Appointment>>>) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            appointments,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserStoreError::EmailTaken(user.email.clone()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = lock(&self.users);
        if users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserStoreError::EmailTaken(user.email.clone()));
        }
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        let mut appointments = lock(&self.appointments);
        let deleted = delete(user_id, &self.users);
        if deleted.is_some() {
            delete_by(&mut appointments, |a| a.user_id == *user_id);
        }
        Ok(deleted)
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        Ok(find(user_id, &self.users))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let email = docbook_utils::normalize_email(email);
        Ok(find_by(&self.users, |u| u.email == email).into_iter().next())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let mut users = find_by(&self.users, |_| true);
        users.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn set_token(&self, user_id: &ID, token: Option<&str>) -> anyhow::Result<()> {
        let mut users = lock(&self.users);
        if let Some(user) = users.iter_mut().find(|u| u.id == *user_id) {
            user.token = token.map(String::from);
        }
        Ok(())
    }
}
