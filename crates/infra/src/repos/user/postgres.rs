use super::{IUserRepo, UserStoreError};
use crate::repos::shared::postgres_repo::{sql_state, UNIQUE_VIOLATION};
use anyhow::Context;
use chrono::{DateTime, Utc};
use docbook_domain::{User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    full_name: String,
    email: String,
    phone: Option<String>,
    password_hash: String,
    role: String,
    token: Option<String>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl TryFrom<UserRaw> for User {
    type Error = anyhow::Error;

    fn try_from(raw: UserRaw) -> Result<Self, Self::Error> {
        Ok(User {
            id: raw.user_uid.into(),
            full_name: raw.full_name,
            email: raw.email,
            phone: raw.phone,
            password_hash: raw.password_hash,
            role: raw.role.parse()?,
            token: raw.token,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn to_store_error(e: sqlx::Error, email: &str) -> UserStoreError {
    if sql_state(&e).as_deref() == Some(UNIQUE_VIOLATION) {
        return UserStoreError::EmailTaken(email.to_string());
    }
    UserStoreError::Storage(anyhow::Error::new(e).context("Unable to store user"))
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, full_name, email, phone, password_hash, role, token, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.token)
        .bind(user.created)
        .bind(user.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| to_store_error(e, &user.email))?;

        Ok(())
    }

    async fn save(&self, user: &User) -> Result<(), UserStoreError> {
        sqlx::query(
            r#"
            UPDATE users
            SET full_name = $2,
            email = $3,
            phone = $4,
            password_hash = $5,
            role = $6,
            token = $7,
            updated = $8
            WHERE user_uid = $1
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.token)
        .bind(user.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| to_store_error(e, &user.email))?;

        Ok(())
    }

    async fn delete(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        let user: Option<UserRaw> = sqlx::query_as(
            r#"
            DELETE FROM users AS u
            WHERE u.user_uid = $1
            RETURNING *
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Unable to delete user")?;

        user.map(User::try_from).transpose()
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        let user: Option<UserRaw> = sqlx::query_as(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Unable to find user")?;

        user.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user: Option<UserRaw> = sqlx::query_as(
            r#"
            SELECT * FROM users AS u
            WHERE u.email = $1
            "#,
        )
        .bind(docbook_utils::normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .context("Unable to find user by email")?;

        user.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> anyhow::Result<Vec<User>> {
        let users: Vec<UserRaw> = sqlx::query_as(
            r#"
            SELECT * FROM users AS u
            ORDER BY u.created, u.user_uid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Unable to list users")?;

        users.into_iter().map(User::try_from).collect()
    }

    async fn set_token(&self, user_id: &ID, token: Option<&str>) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET token = $2
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(token)
        .execute(&self.pool)
        .await
        .context("Unable to store user token")?;

        Ok(())
    }
}
