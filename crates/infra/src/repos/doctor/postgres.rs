use super::IDoctorRepo;
use anyhow::Context;
use chrono::{DateTime, Utc};
use docbook_domain::{Doctor, Schedule, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};

pub struct PostgresDoctorRepo {
    pool: PgPool,
}

impl PostgresDoctorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DoctorRaw {
    doctor_uid: Uuid,
    name: String,
    specialization: String,
    schedule: Json<Schedule>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl From<DoctorRaw> for Doctor {
    fn from(raw: DoctorRaw) -> Self {
        Doctor {
            id: raw.doctor_uid.into(),
            name: raw.name,
            specialization: raw.specialization,
            schedule: raw.schedule.0,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IDoctorRepo for PostgresDoctorRepo {
    async fn insert(&self, doctor: &Doctor) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO doctors(doctor_uid, name, specialization, schedule, created, updated)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(doctor.id.inner_ref())
        .bind(&doctor.name)
        .bind(&doctor.specialization)
        .bind(Json(&doctor.schedule))
        .bind(doctor.created)
        .bind(doctor.updated)
        .execute(&self.pool)
        .await
        .context("Unable to insert doctor")?;

        Ok(())
    }

    async fn save(&self, doctor: &Doctor) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE doctors
            SET name = $2,
            specialization = $3,
            schedule = $4,
            updated = $5
            WHERE doctor_uid = $1
            "#,
        )
        .bind(doctor.id.inner_ref())
        .bind(&doctor.name)
        .bind(&doctor.specialization)
        .bind(Json(&doctor.schedule))
        .bind(doctor.updated)
        .execute(&self.pool)
        .await
        .context("Unable to save doctor")?;

        Ok(())
    }

    async fn delete(&self, doctor_id: &ID) -> anyhow::Result<Option<Doctor>> {
        let doctor: Option<DoctorRaw> = sqlx::query_as(
            r#"
            DELETE FROM doctors AS d
            WHERE d.doctor_uid = $1
            RETURNING *
            "#,
        )
        .bind(doctor_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Unable to delete doctor")?;

        Ok(doctor.map(|d| d.into()))
    }

    async fn find(&self, doctor_id: &ID) -> anyhow::Result<Option<Doctor>> {
        let doctor: Option<DoctorRaw> = sqlx::query_as(
            r#"
            SELECT * FROM doctors AS d
            WHERE d.doctor_uid = $1
            "#,
        )
        .bind(doctor_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Unable to find doctor")?;

        Ok(doctor.map(|d| d.into()))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Doctor>> {
        let doctors: Vec<DoctorRaw> = sqlx::query_as(
            r#"
            SELECT * FROM doctors AS d
            ORDER BY d.name, d.doctor_uid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Unable to list doctors")?;

        Ok(doctors.into_iter().map(|d| d.into()).collect())
    }

    async fn find_by_specialization(&self, specialization: &str) -> anyhow::Result<Vec<Doctor>> {
        let doctors: Vec<DoctorRaw> = sqlx::query_as(
            r#"
            SELECT * FROM doctors AS d
            WHERE lower(d.specialization) = lower($1)
            ORDER BY d.name, d.doctor_uid
            "#,
        )
        .bind(specialization.trim())
        .fetch_all(&self.pool)
        .await
        .context("Unable to find doctors by specialization")?;

        Ok(doctors.into_iter().map(|d| d.into()).collect())
    }

    async fn list_specializations(&self) -> anyhow::Result<Vec<String>> {
        let specializations: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT d.specialization COLLATE "C" AS specialization
            FROM doctors AS d
            ORDER BY 1
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Unable to list specializations")?;

        Ok(specializations.into_iter().map(|(s,)| s).collect())
    }
}
