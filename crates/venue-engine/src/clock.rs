//! Conversion between 12-hour clock labels and hour-of-day numbers.
//!
//! Slot labels look like `"2:00 PM"`. The booking window addresses hours on an
//! extended 0–26 scale where 24, 25 and 26 stand for 12 AM, 1 AM and 2 AM of the
//! following civil day; those are folded back to 0–2 before labeling.

/// Hours per civil day; extended hours at or above this belong to the next day.
pub const HOURS_PER_DAY: u32 = 24;

/// Parse a `"H:MM AM|PM"` label into a 24-hour hour-of-day (0–23).
///
/// Returns `None` for anything malformed. Callers must treat `None` as
/// "unknown", never as midnight.
///
/// ```
/// use venue_engine::clock::parse_label;
///
/// assert_eq!(parse_label("12:00 AM"), Some(0));
/// assert_eq!(parse_label("2:00 PM"), Some(14));
/// assert_eq!(parse_label("noon"), None);
/// ```
pub fn parse_label(label: &str) -> Option<u32> {
    let mut parts = label.split_whitespace();
    let time = parts.next()?;
    let period = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let (hour, minutes) = time.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }
    if minutes.len() != 2 || minutes.parse::<u32>().ok()? > 59 {
        return None;
    }

    match period.to_ascii_uppercase().as_str() {
        "AM" => Some(hour % 12),
        "PM" => Some(hour % 12 + 12),
        _ => None,
    }
}

/// Format an hour-of-day in 0–23 as a `"H:00 AM|PM"` label.
///
/// Values outside 0–23 are folded into the day first, so callers labeling
/// next-day hours may pass either `1` or `25`; see [`format_extended`].
pub fn format_hour(hour: u32) -> String {
    let hour = hour % HOURS_PER_DAY;
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:00 {}", display, suffix)
}

/// Label an hour on the extended 0–26 window scale (24 → "12:00 AM", 26 → "2:00 AM").
pub fn format_extended(hour: u32) -> String {
    format_hour(normalize(hour))
}

/// Fold an extended window hour (24–26) back to its next-day clock hour (0–2).
pub fn normalize(hour: u32) -> u32 {
    if hour >= HOURS_PER_DAY {
        hour - HOURS_PER_DAY
    } else {
        hour
    }
}
