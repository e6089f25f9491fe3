//! Booking requests as submitted by the customer-facing layer.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::{BookingError, Result};
use crate::local::window_hour;
use crate::pricing::{PriceBreakdown, PricingConfig};
use crate::slots::effective_end_hour;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    #[serde(alias = "guests")]
    pub guest_count: i64,
    #[serde(default)]
    pub add_ons: BTreeMap<String, bool>,
    #[serde(deserialize_with = "crate::source::host_id_from_any")]
    pub host_id: String,
}

impl BookingRequest {
    /// Build a request from a calendar date and two slot labels. End labels for
    /// 12–2 AM are placed on the following day.
    pub fn from_labels(
        date: NaiveDate,
        start_label: &str,
        end_label: &str,
        tz: Tz,
        guest_count: i64,
        host_id: impl Into<String>,
    ) -> Result<Self> {
        let start_hour = clock::parse_label(start_label)
            .ok_or_else(|| BookingError::Validation(format!("unreadable start time '{}'", start_label)))?;
        let end_hour = clock::parse_label(end_label)
            .ok_or_else(|| BookingError::Validation(format!("unreadable end time '{}'", end_label)))?;
        let end_hour = effective_end_hour(start_hour, end_hour).ok_or_else(|| {
            BookingError::Validation(format!("{} cannot end a booking starting at {}", end_label, start_label))
        })?;

        Ok(Self {
            start_date_time: window_hour(tz, date, start_hour).with_timezone(&Utc),
            end_date_time: window_hour(tz, date, end_hour).with_timezone(&Utc),
            guest_count,
            add_ons: BTreeMap::new(),
            host_id: host_id.into(),
        })
    }

    pub fn with_add_on(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.add_ons.insert(name.into(), enabled);
        self
    }

    /// Start and end in venue-local time for display, with an end at or before the
    /// start moved forward one day. Pricing does not go through this; it applies
    /// the rollover itself.
    pub fn local_window(&self, tz: Tz) -> (DateTime<Tz>, DateTime<Tz>) {
        let start = self.start_date_time.with_timezone(&tz);
        let mut end = self.end_date_time.with_timezone(&tz);
        if end <= start {
            end += Duration::hours(24);
        }
        (start, end)
    }

    pub fn price(&self, tz: Tz, config: &PricingConfig) -> Result<PriceBreakdown> {
        let start = self.start_date_time.with_timezone(&tz);
        let end = self.end_date_time.with_timezone(&tz);
        config.price(&start, &end, self.guest_count, &self.add_ons)
    }
}
