//! File-backed calendar and pricing sources.
//!
//! The files are read on every fetch; memoization is the session's job.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use venue_engine::interval::QueryWindow;
use venue_engine::source::HostRecord;
use venue_engine::{
    BusyInterval, CalendarSource, PricingDocument, PricingSource, StaticCalendar, StaticPricing,
    UpstreamFetchError,
};

/// A JSON array of `{ "start": ..., "end": ... }` busy intervals.
pub struct JsonFileCalendar {
    path: PathBuf,
}

impl JsonFileCalendar {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CalendarSource for JsonFileCalendar {
    async fn busy_intervals(
        &self,
        date: NaiveDate,
        window: &QueryWindow,
    ) -> Result<Vec<BusyInterval>, UpstreamFetchError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            UpstreamFetchError::Calendar(format!("{}: {}", self.path.display(), e))
        })?;
        let intervals: Vec<BusyInterval> = serde_json::from_str(&raw).map_err(|e| {
            UpstreamFetchError::Calendar(format!("{}: {}", self.path.display(), e))
        })?;
        StaticCalendar::new(intervals).busy_intervals(date, window).await
    }
}

/// A JSON array of host records, `[{ "_id": 0, "pricing": { ... } }]`.
pub struct JsonFilePricing {
    path: PathBuf,
}

impl JsonFilePricing {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PricingSource for JsonFilePricing {
    async fn pricing(&self, host_id: &str) -> Result<PricingDocument, UpstreamFetchError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            UpstreamFetchError::Pricing(format!("{}: {}", self.path.display(), e))
        })?;
        let records: Vec<HostRecord> = serde_json::from_str(&raw).map_err(|e| {
            UpstreamFetchError::Pricing(format!("{}: {}", self.path.display(), e))
        })?;
        StaticPricing::from_records(records).pricing(host_id).await
    }
}
