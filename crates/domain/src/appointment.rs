use crate::{
    shared::entity::{Entity, ID},
    timespan::TimeSpan,
};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Longest slot that can be booked, in minutes
pub const MAX_APPOINTMENT_DURATION: i64 = 60 * 24;
/// Appointments have to start within these years
pub const MIN_APPOINTMENT_YEAR: i32 = 1970;
pub const MAX_APPOINTMENT_YEAR: i32 = 9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Whether an `Appointment` with this status occupies its slot
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// A completed `Appointment` can no longer be cancelled
    pub fn can_change_to(&self, status: AppointmentStatus) -> bool {
        !(*self == Self::Completed && status == Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid appointment status: {0}")]
pub struct InvalidAppointmentStatusError(pub String);

impl FromStr for AppointmentStatus {
    type Err = InvalidAppointmentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(InvalidAppointmentStatusError(s.to_string())),
        }
    }
}

/// A `User` occupying a slot in the calendar of a `Doctor`.
///
/// For a given doctor no two active appointments may have overlapping
/// spans, see `Appointment::conflicts_with`.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: ID,
    pub doctor_id: ID,
    pub user_id: ID,
    pub start_time: DateTime<Utc>,
    /// Length of the slot in minutes
    pub duration: i64,
    pub status: AppointmentStatus,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Appointment {
    pub fn new(
        doctor_id: ID,
        user_id: ID,
        start_time: DateTime<Utc>,
        duration: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            doctor_id,
            user_id,
            start_time,
            duration,
            status: AppointmentStatus::Scheduled,
            created: now,
            updated: now,
        }
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.span().end()
    }

    pub fn span(&self) -> TimeSpan {
        TimeSpan::from_minutes(self.start_time, self.duration)
    }

    pub fn is_valid_duration(duration: i64) -> bool {
        duration > 0 && duration <= MAX_APPOINTMENT_DURATION
    }

    pub fn is_valid_start_time(start_time: &DateTime<Utc>) -> bool {
        (MIN_APPOINTMENT_YEAR..=MAX_APPOINTMENT_YEAR).contains(&start_time.year())
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether `self` and `other` can not both be stored
    pub fn conflicts_with(&self, other: &Appointment) -> bool {
        self.id != other.id
            && self.doctor_id == other.doctor_id
            && self.is_active()
            && other.is_active()
            && self.span().overlaps(&other.span())
    }
}

impl Entity for Appointment {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("The appointment with id: {0} can not change status from {1} to {2}")]
pub struct InvalidStatusChangeError(pub ID, pub AppointmentStatus, pub AppointmentStatus);

/// Changes to the start, duration or status of an `Appointment`. They are
/// applied to whatever version of the `Appointment` is stored when the
/// change is written, fields left as `None` keep their stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentChanges {
    pub start_time: Option<DateTime<Utc>>,
    pub duration: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub updated: DateTime<Utc>,
}

impl AppointmentChanges {
    pub fn new(updated: DateTime<Utc>) -> Self {
        Self {
            start_time: None,
            duration: None,
            status: None,
            updated,
        }
    }

    pub fn status(status: AppointmentStatus, updated: DateTime<Utc>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(updated)
        }
    }

    /// Whether the slot of the `Appointment` is changed
    pub fn moves(&self) -> bool {
        self.start_time.is_some() || self.duration.is_some()
    }

    pub fn apply(&self, appointment: &Appointment) -> Result<Appointment, InvalidStatusChangeError> {
        let mut changed = appointment.clone();
        if let Some(status) = self.status {
            if !appointment.status.can_change_to(status) {
                return Err(InvalidStatusChangeError(
                    appointment.id.clone(),
                    appointment.status,
                    status,
                ));
            }
            changed.status = status;
        }
        if let Some(start_time) = self.start_time {
            changed.start_time = start_time;
        }
        if let Some(duration) = self.duration {
            changed.duration = duration;
        }
        changed.updated = self.updated;
        Ok(changed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, hour, minute, 0).unwrap()
    }

    fn appointment(doctor_id: &ID, start: DateTime<Utc>, duration: i64) -> Appointment {
        Appointment::new(doctor_id.clone(), ID::new(), start, duration, at(0, 0))
    }

    #[test]
    fn new_appointments_are_scheduled() {
        let doctor_id = ID::new();
        let a = appointment(&doctor_id, at(10, 0), 30);
        assert_eq!(a.status, AppointmentStatus::Scheduled);
        assert_eq!(a.end_time(), at(10, 30));
        assert!(a.is_active());
    }

    #[test]
    fn detects_conflicts_for_same_doctor() {
        let doctor_id = ID::new();
        let a = appointment(&doctor_id, at(10, 0), 30);
        let b = appointment(&doctor_id, at(10, 15), 30);
        let c = appointment(&doctor_id, at(10, 30), 30);
        assert!(a.conflicts_with(&b));
        assert!(!a.conflicts_with(&c));
        // The same appointment never conflicts with itself
        assert!(!a.conflicts_with(&a));
    }

    #[test]
    fn ignores_other_doctors_and_cancelled() {
        let doctor_id = ID::new();
        let a = appointment(&doctor_id, at(10, 0), 30);
        let other_doctor = appointment(&ID::new(), at(10, 0), 30);
        assert!(!a.conflicts_with(&other_doctor));

        let mut cancelled = appointment(&doctor_id, at(10, 0), 30);
        cancelled.status = AppointmentStatus::Cancelled;
        assert!(!a.conflicts_with(&cancelled));
        assert!(!cancelled.conflicts_with(&a));

        let mut completed = appointment(&doctor_id, at(10, 10), 10);
        completed.status = AppointmentStatus::Completed;
        assert!(a.conflicts_with(&completed));
    }

    #[test]
    fn validates_duration() {
        assert!(!Appointment::is_valid_duration(0));
        assert!(!Appointment::is_valid_duration(-30));
        assert!(Appointment::is_valid_duration(1));
        assert!(Appointment::is_valid_duration(MAX_APPOINTMENT_DURATION));
        assert!(!Appointment::is_valid_duration(MAX_APPOINTMENT_DURATION + 1));
    }

    #[test]
    fn validates_start_time() {
        assert!(Appointment::is_valid_start_time(&at(10, 0)));
        let far_future: DateTime<Utc> = "+262142-12-31T23:59:00Z".parse().unwrap();
        assert!(!Appointment::is_valid_start_time(&far_future));
        assert!(!Appointment::is_valid_start_time(&DateTime::<Utc>::MIN_UTC));

        // Computing the end never overflows
        let a = appointment(&ID::new(), far_future, 30);
        assert_eq!(a.end_time(), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn applies_changes_to_given_version() {
        let doctor_id = ID::new();
        let mut stored = appointment(&doctor_id, at(10, 0), 30);
        stored.status = AppointmentStatus::Cancelled;

        // Moving keeps the stored status
        let mut changes = AppointmentChanges::new(at(9, 0));
        changes.start_time = Some(at(11, 0));
        let moved = changes.apply(&stored).unwrap();
        assert_eq!(moved.start_time, at(11, 0));
        assert_eq!(moved.duration, 30);
        assert_eq!(moved.status, AppointmentStatus::Cancelled);
        assert_eq!(moved.updated, at(9, 0));
        assert!(changes.moves());

        let cancel = AppointmentChanges::status(AppointmentStatus::Cancelled, at(9, 0));
        assert!(!cancel.moves());
        stored.status = AppointmentStatus::Completed;
        assert_eq!(
            cancel.apply(&stored),
            Err(InvalidStatusChangeError(
                stored.id.clone(),
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled
            ))
        );
        stored.status = AppointmentStatus::Scheduled;
        assert_eq!(
            cancel.apply(&stored).unwrap().status,
            AppointmentStatus::Cancelled
        );
    }

    #[test]
    fn parses_status() {
        assert_eq!("scheduled".parse(), Ok(AppointmentStatus::Scheduled));
        assert_eq!(" Cancelled ".parse(), Ok(AppointmentStatus::Cancelled));
        assert_eq!("canceled".parse(), Ok(AppointmentStatus::Cancelled));
        assert_eq!("completed".parse(), Ok(AppointmentStatus::Completed));
        assert!("booked".parse::<AppointmentStatus>().is_err());
        assert_eq!(AppointmentStatus::Completed.to_string(), "completed");
    }
}
