use crate::{
    shared::entity::{Entity, ID},
    timespan::TimeSpan,
};
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Doctor {
    pub id: ID,
    pub name: String,
    pub specialization: String,
    pub schedule: Schedule,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Doctor {
    pub fn new(
        name: String,
        specialization: String,
        schedule: Schedule,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            name,
            specialization,
            schedule,
            created: now,
            updated: now,
        }
    }
}

impl Entity for Doctor {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Time of day in UTC, written as `HH:MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Time {
    hours: u32,
    minutes: u32,
}

impl Time {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(Self { hours, minutes })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    fn seconds_from_midnight(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

impl FromStr for Time {
    type Err = InvalidScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidScheduleError::MalformedTime(s.to_string());
        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        let hours = hours.parse::<u32>().map_err(|_| invalid())?;
        let minutes = minutes.parse::<u32>().map_err(|_| invalid())?;
        Time::new(hours, minutes).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Time {
    type Error = InvalidScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Time> for String {
    fn from(time: Time) -> Self {
        time.to_string()
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidScheduleError {
    #[error("Time: {0} is malformed, expected HH:MM")]
    MalformedTime(String),
    #[error("A schedule needs at least one working day")]
    NoWorkingDays,
    #[error("Schedule start: {0} must be before end: {1}")]
    StartNotBeforeEnd(Time, Time),
}

/// The working hours of a `Doctor`: the same daily interval on
/// every working day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleRaw")]
pub struct Schedule {
    days: Vec<Weekday>,
    start: Time,
    end: Time,
}

#[derive(Deserialize)]
struct ScheduleRaw {
    days: Vec<Weekday>,
    start: Time,
    end: Time,
}

impl TryFrom<ScheduleRaw> for Schedule {
    type Error = InvalidScheduleError;

    fn try_from(raw: ScheduleRaw) -> Result<Self, Self::Error> {
        Schedule::new(raw.days, raw.start, raw.end)
    }
}

impl Schedule {
    pub fn new(
        mut days: Vec<Weekday>,
        start: Time,
        end: Time,
    ) -> Result<Self, InvalidScheduleError> {
        if start >= end {
            return Err(InvalidScheduleError::StartNotBeforeEnd(start, end));
        }
        days.sort_by_key(|d| d.num_days_from_monday());
        days.dedup();
        if days.is_empty() {
            return Err(InvalidScheduleError::NoWorkingDays);
        }
        Ok(Self { days, start, end })
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn start(&self) -> Time {
        self.start
    }

    pub fn end(&self) -> Time {
        self.end
    }

    /// Whether the whole `TimeSpan` lies within the working hours of a
    /// single working day
    pub fn covers(&self, span: &TimeSpan) -> bool {
        let (start, end) = (span.start(), span.end());
        if start.date_naive() != end.date_naive() || start > end {
            return false;
        }
        if !self.days.contains(&start.weekday()) {
            return false;
        }
        start.num_seconds_from_midnight() >= self.start.seconds_from_midnight()
            && end.num_seconds_from_midnight() <= self.end.seconds_from_midnight()
    }
}

impl Default for Schedule {
    /// Monday to friday, 09:00 - 17:00
    fn default() -> Self {
        Self {
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            start: Time {
                hours: 9,
                minutes: 0,
            },
            end: Time {
                hours: 17,
                minutes: 0,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_time() {
        assert_eq!("09:00".parse::<Time>(), Ok(Time::new(9, 0).unwrap()));
        assert_eq!("9:30".parse::<Time>(), Ok(Time::new(9, 30).unwrap()));
        assert_eq!("23:59".parse::<Time>(), Ok(Time::new(23, 59).unwrap()));
        assert!("24:00".parse::<Time>().is_err());
        assert!("12:60".parse::<Time>().is_err());
        assert!("12".parse::<Time>().is_err());
        assert!("12:5".parse::<Time>().is_err());
        assert!("ab:cd".parse::<Time>().is_err());
        assert_eq!(Time::new(7, 5).unwrap().to_string(), "07:05");
    }

    #[test]
    fn validates_schedule() {
        let nine = Time::new(9, 0).unwrap();
        let five = Time::new(17, 0).unwrap();
        assert_eq!(
            Schedule::new(vec![], nine, five),
            Err(InvalidScheduleError::NoWorkingDays)
        );
        assert_eq!(
            Schedule::new(vec![Weekday::Mon], five, nine),
            Err(InvalidScheduleError::StartNotBeforeEnd(five, nine))
        );
        assert!(Schedule::new(vec![Weekday::Mon], nine, nine).is_err());

        let schedule =
            Schedule::new(vec![Weekday::Fri, Weekday::Mon, Weekday::Fri], nine, five).unwrap();
        assert_eq!(schedule.days(), &[Weekday::Mon, Weekday::Fri]);
    }

    #[test]
    fn covers_spans_within_working_hours() {
        let schedule = Schedule::default();
        // 2024-03-04 is a monday
        let monday = |h: u32, m: u32| Utc.with_ymd_and_hms(2024, 3, 4, h, m, 0).unwrap();
        assert!(schedule.covers(&TimeSpan::from_minutes(monday(9, 0), 30)));
        assert!(schedule.covers(&TimeSpan::from_minutes(monday(16, 30), 30)));
        assert!(!schedule.covers(&TimeSpan::from_minutes(monday(16, 45), 30)));
        assert!(!schedule.covers(&TimeSpan::from_minutes(monday(8, 45), 30)));

        let saturday = Utc.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).unwrap();
        assert!(!schedule.covers(&TimeSpan::from_minutes(saturday, 30)));
    }

    #[test]
    fn schedule_json_format() {
        let json = r#"{"days":["Monday","tue","Wed"],"start":"08:30","end":"12:00"}"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.start(), Time::new(8, 30).unwrap());
        assert!(serde_json::from_str::<Schedule>(
            r#"{"days":["Mon"],"start":"12:00","end":"08:00"}"#
        )
        .is_err());
        assert_eq!(schedule.days().len(), 3);
        let out = serde_json::to_value(&schedule).unwrap();
        assert_eq!(out["start"], "08:30");
        assert_eq!(out["end"], "12:00");
    }
}
