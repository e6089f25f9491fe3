//! Per-hour availability across the booking window.
//!
//! Each integer hour of the extended window (0–26) is anchored to a concrete
//! local instant on the right civil day and checked for membership in the busy
//! intervals. Input intervals are only read: they may overlap, arrive unsorted or
//! span midnight, and none of that needs pre-processing because every check is a
//! point-in-interval test against absolute instants.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::interval::BusyInterval;
use crate::local::window_hour;

/// Last addressable hour of the window (2 AM of the following day).
pub const LAST_WINDOW_HOUR: u32 = 26;

/// Availability flags for one venue day, indexed by extended hour 0–26.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAvailability {
    free: [bool; LAST_WINDOW_HOUR as usize + 1],
}

impl DayAvailability {
    /// Resolve availability for `date` in the venue timezone `tz`.
    pub fn resolve(date: NaiveDate, tz: Tz, busy: &[BusyInterval]) -> Self {
        let mut free = [true; LAST_WINDOW_HOUR as usize + 1];
        if !busy.is_empty() {
            for (hour, slot) in (0..=LAST_WINDOW_HOUR).zip(free.iter_mut()) {
                let candidate = window_hour(tz, date, hour);
                *slot = !busy.iter().any(|interval| interval.contains(&candidate));
            }
        }
        Self { free }
    }

    /// A day with nothing booked.
    pub fn all_free() -> Self {
        Self {
            free: [true; LAST_WINDOW_HOUR as usize + 1],
        }
    }

    /// Whether the hour starting at extended hour `hour` is free.
    /// Hours past the window are reported busy.
    pub fn is_free(&self, hour: u32) -> bool {
        self.free.get(hour as usize).copied().unwrap_or(false)
    }

    /// Whether any hour in the inclusive range is free.
    pub fn any_free(&self, hours: std::ops::RangeInclusive<u32>) -> bool {
        hours.into_iter().any(|h| self.is_free(h))
    }
}
