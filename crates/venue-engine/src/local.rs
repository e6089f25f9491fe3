//! Anchoring wall-clock hours to instants in the venue's timezone.
//!
//! "9 AM" always means 9 AM local time. Wall-clock hours that do not exist
//! (spring-forward gap) are shifted forward past the gap; hours that occur twice
//! (fall-back overlap) resolve to the first occurrence.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::clock::HOURS_PER_DAY;

/// Resolve a naive local datetime in `tz` to a concrete instant.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Same wall time one day earlier carries the pre-gap offset.
            let pre_gap = tz
                .from_local_datetime(&(naive - Duration::days(1)))
                .earliest()
                .map(|dt| dt.offset().fix().local_minus_utc())
                .unwrap_or(0);
            tz.from_utc_datetime(&(naive - Duration::seconds(i64::from(pre_gap))))
        }
    }
}

/// The instant at which extended window hour `hour` (0–26) begins for `date`.
///
/// Hours 0–23 fall on `date` itself; 24–26 roll over to 0–2 on the next day.
pub fn window_hour(tz: Tz, date: NaiveDate, hour: u32) -> DateTime<Tz> {
    let (day, clock_hour) = if hour >= HOURS_PER_DAY {
        (next_date(date), hour - HOURS_PER_DAY)
    } else {
        (date, hour)
    };
    resolve_local(tz, day.and_time(chrono::NaiveTime::MIN) + Duration::hours(i64::from(clock_hour)))
}

/// Local midnight at the start of `date`.
pub fn start_of_day(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    resolve_local(tz, date.and_time(chrono::NaiveTime::MIN))
}

pub(crate) fn next_date(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}
