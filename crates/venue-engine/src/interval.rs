//! Busy intervals reported by the calendar, and the window they are queried for.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::availability::LAST_WINDOW_HOUR;
use crate::local::{start_of_day, window_hour};

/// A pre-existing commitment on the venue calendar, half-open `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether `instant` falls inside this interval. The end is exclusive, so a
    /// booking that ends at 14:00 leaves the 14:00 hour free.
    pub fn contains<T: chrono::TimeZone>(&self, instant: &DateTime<T>) -> bool {
        let instant = instant.with_timezone(&Utc);
        self.start <= instant && instant < self.end
    }
}

/// The span the calendar is queried for on one venue day.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    /// Whether an interval touches the window at all.
    pub fn overlaps(&self, interval: &BusyInterval) -> bool {
        interval.start < self.end && interval.end > self.start
    }
}

/// The query window for `date`: local midnight through the end of the 2 AM hour
/// on the following day.
///
/// Both ends are anchored in local time, so a fall-back night still reaches the
/// real 2 AM rather than stopping one hour short.
pub fn day_window(date: NaiveDate, tz: Tz) -> QueryWindow {
    QueryWindow {
        start: start_of_day(tz, date).with_timezone(&Utc),
        end: (window_hour(tz, date, LAST_WINDOW_HOUR) + Duration::hours(1)).with_timezone(&Utc),
    }
}
