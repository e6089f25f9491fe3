//! Start and end time slots offered to the customer.

use serde::{Deserialize, Serialize};

use crate::availability::{DayAvailability, LAST_WINDOW_HOUR};
use crate::clock::{self, HOURS_PER_DAY};

/// First bookable hour of the day.
pub const FIRST_START_HOUR: u32 = 9;
/// Last hour a booking may start at (10 PM).
pub const LAST_START_HOUR: u32 = 22;
/// Last regular end hour (1 AM next day); 2 AM is synthesized separately.
pub const LAST_END_HOUR: u32 = 25;
/// Next-day clock hours an end time may wrap around into.
pub const MAX_WRAP_HOUR: u32 = 2;

/// A selectable time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub label: String,
    /// Extended hour (0–26); 24 and above are on the next civil day.
    pub hour_of_day: u32,
    pub available: bool,
}

impl TimeSlot {
    fn at(day: &DayAvailability, hour: u32) -> Self {
        Self {
            label: clock::format_extended(hour),
            hour_of_day: hour,
            available: day.is_free(hour),
        }
    }
}

/// Start-time slots, 9 AM through 10 PM.
pub fn start_slots(day: &DayAvailability) -> Vec<TimeSlot> {
    (FIRST_START_HOUR..=LAST_START_HOUR)
        .map(|hour| TimeSlot::at(day, hour))
        .collect()
}

/// Every regular end-time slot, 9 AM through 1 AM the next day.
pub fn end_slots(day: &DayAvailability) -> Vec<TimeSlot> {
    (FIRST_START_HOUR..=LAST_END_HOUR)
        .map(|hour| TimeSlot::at(day, hour))
        .collect()
}

/// Resolve an end label against a start hour (0–23), returning the effective end
/// hour for duration purposes, or `None` when the pairing is not allowed.
///
/// An end earlier than the start is only accepted for 12–2 AM, which is read as
/// the following day.
pub fn effective_end_hour(start_hour: u32, end_hour: u32) -> Option<u32> {
    let end = if end_hour < start_hour {
        if end_hour > MAX_WRAP_HOUR {
            return None;
        }
        end_hour + HOURS_PER_DAY
    } else {
        end_hour
    };
    (end > start_hour).then_some(end)
}

/// End-time slots offered once the customer has picked `start_label`.
///
/// Slots that cannot follow the start are left out entirely. A 2:00 AM option is
/// appended when any hour of the next-day 12–2 AM band is free. An unparsable
/// start label offers nothing.
pub fn offered_end_slots(day: &DayAvailability, start_label: &str) -> Vec<TimeSlot> {
    let Some(start_hour) = clock::parse_label(start_label) else {
        return Vec::new();
    };

    let mut offered: Vec<TimeSlot> = end_slots(day)
        .into_iter()
        .filter(|slot| {
            clock::parse_label(&slot.label)
                .and_then(|end_hour| effective_end_hour(start_hour, end_hour))
                .is_some()
        })
        .collect();

    if day.any_free(HOURS_PER_DAY..=LAST_WINDOW_HOUR) {
        offered.push(TimeSlot {
            label: clock::format_extended(LAST_WINDOW_HOUR),
            hour_of_day: LAST_WINDOW_HOUR,
            available: true,
        });
    }

    offered
}
