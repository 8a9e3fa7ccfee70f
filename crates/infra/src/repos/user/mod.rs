mod inmemory;
mod postgres;

use docbook_domain::{User, ID};
pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserStoreError {
    #[error("A user with the email: {0} already exists")]
    EmailTaken(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;
    async fn save(&self, user: &User) -> Result<(), UserStoreError>;
    /// Removes the `User` together with all of its `Appointment`s
    async fn delete(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_all(&self) -> anyhow::Result<Vec<User>>;
    async fn set_token(&self, user_id: &ID, token: Option<&str>) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_context;
    use docbook_domain::Role;

    fn user(email: &str) -> User {
        User::new(
            "Test User".into(),
            email,
            "hash".into(),
            Role::User,
            chrono::Utc::now(),
        )
    }

    #[tokio::test]
    async fn crud() {
        let ctx = setup_context().await.expect("To setup context");

        let email = format!("{}@docbook.test", docbook_domain::ID::new());
        let mut user = user(&email);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let found = ctx
            .repos
            .users
            .find(&user.id)
            .await
            .expect("To query user")
            .expect("To find user");
        assert_eq!(found.email, email);

        let by_email = ctx
            .repos
            .users
            .find_by_email(&email.to_uppercase())
            .await
            .expect("To query user");
        assert_eq!(by_email.map(|u| u.id), Some(user.id.clone()));

        user.full_name = "Renamed".into();
        user.phone = Some("+4712345678".into());
        ctx.repos.users.save(&user).await.expect("To save user");
        let found = ctx.repos.users.find(&user.id).await.unwrap().unwrap();
        assert_eq!(found.full_name, "Renamed");
        assert_eq!(found.phone.as_deref(), Some("+4712345678"));

        let deleted = ctx.repos.users.delete(&user.id).await.unwrap();
        assert_eq!(deleted.map(|u| u.id), Some(user.id.clone()));
        assert!(ctx.repos.users.find(&user.id).await.unwrap().is_none());
        assert!(ctx.repos.users.delete(&user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let ctx = setup_context().await.expect("To setup context");

        let email = format!("{}@docbook.test", docbook_domain::ID::new());
        ctx.repos
            .users
            .insert(&user(&email))
            .await
            .expect("To insert user");

        let res = ctx.repos.users.insert(&user(&email)).await;
        assert!(matches!(res, Err(UserStoreError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn stores_token() {
        let ctx = setup_context().await.expect("To setup context");

        let user = user(&format!("{}@docbook.test", docbook_domain::ID::new()));
        ctx.repos.users.insert(&user).await.unwrap();
        ctx.repos
            .users
            .set_token(&user.id, Some("token"))
            .await
            .expect("To set token");
        let found = ctx.repos.users.find(&user.id).await.unwrap().unwrap();
        assert_eq!(found.token.as_deref(), Some("token"));

        ctx.repos.users.set_token(&user.id, None).await.unwrap();
        let found = ctx.repos.users.find(&user.id).await.unwrap().unwrap();
        assert!(found.token.is_none());
    }
}
