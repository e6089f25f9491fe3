//! A customer's booking session: fetches once per date or host, then computes.
//!
//! The session owns its memo tables. Slot lists are keyed by civil date and
//! pricing by host id; neither is evicted or invalidated while the session lives.
//! Two sessions asking for the same date each hit the calendar; this is fine
//! because the computation over the fetched data is pure.

use std::collections::HashMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::availability::DayAvailability;
use crate::booking::BookingRequest;
use crate::error::Result;
use crate::interval::day_window;
use crate::pricing::{PriceBreakdown, PricingConfig};
use crate::slots::{self, TimeSlot};
use crate::source::{CalendarSource, PricingSource};

/// Slots computed for one venue day.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySlots {
    pub availability: DayAvailability,
    pub start_slots: Vec<TimeSlot>,
}

impl DaySlots {
    pub fn new(availability: DayAvailability) -> Self {
        Self {
            start_slots: slots::start_slots(&availability),
            availability,
        }
    }
}

pub struct BookingSession<C, P> {
    timezone: Tz,
    calendar: C,
    pricing: P,
    days: HashMap<NaiveDate, DaySlots>,
    hosts: HashMap<String, PricingConfig>,
}

impl<C: CalendarSource, P: PricingSource> BookingSession<C, P> {
    pub fn new(timezone: Tz, calendar: C, pricing: P) -> Self {
        Self {
            timezone,
            calendar,
            pricing,
            days: HashMap::new(),
            hosts: HashMap::new(),
        }
    }

    /// Slots for `date`, fetching the calendar on first use.
    pub async fn day(&mut self, date: NaiveDate) -> Result<&DaySlots> {
        if self.days.contains_key(&date) {
            debug!(%date, "slot memo hit");
        } else {
            let window = day_window(date, self.timezone);
            info!(%date, start = %window.start, end = %window.end, "fetching busy intervals");
            let busy = self
                .calendar
                .busy_intervals(date, &window)
                .await
                .inspect_err(|e| warn!(%date, error = %e, "calendar fetch failed"))?;
            debug!(%date, intervals = busy.len(), "resolving availability");
            let availability = DayAvailability::resolve(date, self.timezone, &busy);
            self.days.insert(date, DaySlots::new(availability));
        }
        Ok(&self.days[&date])
    }

    pub async fn offered_start_slots(&mut self, date: NaiveDate) -> Result<Vec<TimeSlot>> {
        Ok(self.day(date).await?.start_slots.clone())
    }

    pub async fn offered_end_slots(
        &mut self,
        date: NaiveDate,
        start_label: &str,
    ) -> Result<Vec<TimeSlot>> {
        let day = self.day(date).await?;
        Ok(slots::offered_end_slots(&day.availability, start_label))
    }

    /// Validated pricing for `host_id`, fetching on first use. A document with a
    /// missing field fails here and is not memoized.
    pub async fn pricing_config(&mut self, host_id: &str) -> Result<&PricingConfig> {
        if self.hosts.contains_key(host_id) {
            debug!(host_id, "pricing memo hit");
        } else {
            info!(host_id, "fetching pricing document");
            let document = self
                .pricing
                .pricing(host_id)
                .await
                .inspect_err(|e| warn!(host_id, error = %e, "pricing fetch failed"))?;
            let config = document.validate()?;
            self.hosts.insert(host_id.to_string(), config);
        }
        Ok(&self.hosts[host_id])
    }

    pub async fn compute_price(&mut self, request: &BookingRequest) -> Result<PriceBreakdown> {
        let timezone = self.timezone;
        let config = self.pricing_config(&request.host_id).await?;
        let breakdown = request.price(timezone, config)?;
        debug!(host_id = %request.host_id, total = %breakdown.total, "priced booking");
        Ok(breakdown)
    }

    /// Dates with a memoized slot list.
    pub fn cached_dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.days.keys()
    }
}
