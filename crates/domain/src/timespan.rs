use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Half open time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The span of `minutes` starting at `start`. The end saturates at
    /// the latest representable instant instead of overflowing.
    pub fn from_minutes(start: DateTime<Utc>, minutes: i64) -> Self {
        let end = start
            .checked_add_signed(Duration::minutes(minutes))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Two spans overlap when they share at least one instant.
    /// Spans that only touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}
