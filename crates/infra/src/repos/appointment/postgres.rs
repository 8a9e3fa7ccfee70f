use super::{AppointmentStoreError, IAppointmentRepo};
use crate::repos::shared::postgres_repo::{is_transient, sql_state, EXCLUSION_VIOLATION};
use anyhow::Context;
use chrono::{DateTime, Utc};
use docbook_domain::{Appointment, AppointmentChanges, ID};
use sqlx::{types::Uuid, FromRow, PgConnection, PgPool};
use std::convert::TryFrom;
use tracing::warn;

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_uid: Uuid,
    doctor_uid: Uuid,
    user_uid: Uuid,
    start_ts: DateTime<Utc>,
    duration: i64,
    status: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl TryFrom<AppointmentRaw> for Appointment {
    type Error = anyhow::Error;

    fn try_from(raw: AppointmentRaw) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: raw.appointment_uid.into(),
            doctor_id: raw.doctor_uid.into(),
            user_id: raw.user_uid.into(),
            start_time: raw.start_ts,
            duration: raw.duration,
            status: raw.status.parse()?,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn to_appointments(raw: Vec<AppointmentRaw>) -> anyhow::Result<Vec<Appointment>> {
    raw.into_iter().map(Appointment::try_from).collect()
}

fn to_store_error(e: sqlx::Error, context: &'static str) -> AppointmentStoreError {
    if is_transient(&e) {
        warn!("{}: {:?}", context, e);
        return AppointmentStoreError::Unavailable(e.to_string());
    }
    if sql_state(&e).as_deref() == Some(EXCLUSION_VIOLATION) {
        return AppointmentStoreError::Conflict(None);
    }
    AppointmentStoreError::Storage(anyhow::Error::new(e).context(context))
}

/// Takes the row lock of the doctor for the rest of the transaction.
/// Every write of an appointment of that doctor goes through this lock,
/// which makes the overlap check and the following write atomic.
async fn lock_doctor(conn: &mut PgConnection, doctor_id: &ID) -> Result<bool, AppointmentStoreError> {
    let doctor: Option<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT d.doctor_uid FROM doctors AS d
        WHERE d.doctor_uid = $1
        FOR UPDATE
        "#,
    )
    .bind(doctor_id.inner_ref())
    .fetch_optional(conn)
    .await
    .map_err(|e| to_store_error(e, "Unable to lock doctor"))?;

    Ok(doctor.is_some())
}

/// Reads the appointment inside the transaction, `for_update` also takes
/// its row lock
async fn find_appointment(
    conn: &mut PgConnection,
    appointment_id: &ID,
    for_update: bool,
) -> Result<Option<Appointment>, AppointmentStoreError> {
    let query = if for_update {
        "SELECT * FROM appointments AS a WHERE a.appointment_uid = $1 FOR UPDATE"
    } else {
        "SELECT * FROM appointments AS a WHERE a.appointment_uid = $1"
    };
    let appointment: Option<AppointmentRaw> = sqlx::query_as(query)
        .bind(appointment_id.inner_ref())
        .fetch_optional(conn)
        .await
        .map_err(|e| to_store_error(e, "Unable to read appointment"))?;

    Ok(appointment.map(Appointment::try_from).transpose()?)
}

/// The first active appointment of the doctor, other than the given one,
/// that overlaps the span of the given appointment
async fn find_conflict(
    conn: &mut PgConnection,
    appointment: &Appointment,
) -> Result<Option<ID>, AppointmentStoreError> {
    let conflict: Option<(Uuid,)> = sqlx::query_as(
        r#"
        SELECT a.appointment_uid FROM appointments AS a
        WHERE a.doctor_uid = $1
        AND a.appointment_uid <> $2
        AND a.status <> 'cancelled'
        AND a.start_ts < $4
        AND a.end_ts > $3
        ORDER BY a.start_ts, a.appointment_uid
        LIMIT 1
        "#,
    )
    .bind(appointment.doctor_id.inner_ref())
    .bind(appointment.id.inner_ref())
    .bind(appointment.start_time)
    .bind(appointment.end_time())
    .fetch_optional(conn)
    .await
    .map_err(|e| to_store_error(e, "Unable to check for overlapping appointments"))?;

    Ok(conflict.map(|(id,)| id.into()))
}

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn reserve(&self, appointment: &Appointment) -> Result<(), AppointmentStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| to_store_error(e, "Unable to start transaction"))?;

        // Dropping `tx` on an early return rolls the transaction back
        if !lock_doctor(&mut tx, &appointment.doctor_id).await? {
            return Err(AppointmentStoreError::DoctorNotFound(
                appointment.doctor_id.clone(),
            ));
        }
        if find_appointment(&mut tx, &appointment.id, false)
            .await?
            .is_some()
        {
            return Ok(());
        }
        if appointment.is_active() {
            if let Some(id) = find_conflict(&mut tx, appointment).await? {
                return Err(AppointmentStoreError::Conflict(Some(id)));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO appointments(appointment_uid, doctor_uid, user_uid, start_ts, end_ts, duration, status, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(appointment.doctor_id.inner_ref())
        .bind(appointment.user_id.inner_ref())
        .bind(appointment.start_time)
        .bind(appointment.end_time())
        .bind(appointment.duration)
        .bind(appointment.status.as_str())
        .bind(appointment.created)
        .bind(appointment.updated)
        .execute(&mut *tx)
        .await
        .map_err(|e| to_store_error(e, "Unable to insert appointment"))?;

        tx.commit()
            .await
            .map_err(|e| to_store_error(e, "Unable to commit appointment"))
    }

    async fn update(
        &self,
        appointment_id: &ID,
        changes: &AppointmentChanges,
    ) -> Result<Appointment, AppointmentStoreError> {
        let not_found = || AppointmentStoreError::AppointmentNotFound(appointment_id.clone());
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| to_store_error(e, "Unable to start transaction"))?;

        // The doctor of an appointment never changes, so it is safe to read
        // it before taking the lock
        let doctor_id = match find_appointment(&mut tx, appointment_id, false).await? {
            Some(appointment) => appointment.doctor_id,
            None => return Err(not_found()),
        };
        if !lock_doctor(&mut tx, &doctor_id).await? {
            return Err(not_found());
        }
        let stored = match find_appointment(&mut tx, appointment_id, true).await? {
            Some(appointment) => appointment,
            None => return Err(not_found()),
        };
        let changed = changes
            .apply(&stored)
            .map_err(AppointmentStoreError::InvalidStatusChange)?;
        if changed.is_active() {
            if let Some(id) = find_conflict(&mut tx, &changed).await? {
                return Err(AppointmentStoreError::Conflict(Some(id)));
            }
        }

        let updated: AppointmentRaw = sqlx::query_as(
            r#"
            UPDATE appointments
            SET start_ts = $2,
            end_ts = $3,
            duration = $4,
            status = $5,
            updated = $6
            WHERE appointment_uid = $1
            RETURNING *
            "#,
        )
        .bind(changed.id.inner_ref())
        .bind(changed.start_time)
        .bind(changed.end_time())
        .bind(changed.duration)
        .bind(changed.status.as_str())
        .bind(changed.updated)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| to_store_error(e, "Unable to update appointment"))?;

        let updated = Appointment::try_from(updated)?;
        tx.commit()
            .await
            .map_err(|e| to_store_error(e, "Unable to commit appointment"))?;

        Ok(updated)
    }

    async fn delete(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>> {
        let appointment: Option<AppointmentRaw> = sqlx::query_as(
            r#"
            DELETE FROM appointments AS a
            WHERE a.appointment_uid = $1
            RETURNING *
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Unable to delete appointment")?;

        appointment.map(Appointment::try_from).transpose()
    }

    async fn find(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>> {
        let appointment: Option<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .context("Unable to find appointment")?;

        appointment.map(Appointment::try_from).transpose()
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Appointment>> {
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            ORDER BY a.start_ts, a.appointment_uid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Unable to list appointments")?;

        to_appointments(appointments)
    }

    async fn find_by_doctor(&self, doctor_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.doctor_uid = $1
            ORDER BY a.start_ts, a.appointment_uid
            "#,
        )
        .bind(doctor_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .context("Unable to find appointments by doctor")?;

        to_appointments(appointments)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.user_uid = $1
            ORDER BY a.start_ts, a.appointment_uid
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .context("Unable to find appointments by user")?;

        to_appointments(appointments)
    }

    async fn find_booked_by_doctor(&self, doctor_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.doctor_uid = $1 AND a.status = 'scheduled'
            ORDER BY a.start_ts, a.appointment_uid
            "#,
        )
        .bind(doctor_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .context("Unable to find booked appointments by doctor")?;

        to_appointments(appointments)
    }

    async fn find_booked_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Appointment>> {
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.user_uid = $1 AND a.status = 'scheduled'
            ORDER BY a.start_ts, a.appointment_uid
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .context("Unable to find booked appointments by user")?;

        to_appointments(appointments)
    }
}
