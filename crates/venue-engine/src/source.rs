//! External collaborators: the venue calendar and the host pricing store.
//!
//! Both are async and fallible. Each call is a single attempt and the result is
//! handed back as-is; retries and user messaging belong to the caller.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::UpstreamFetchError;
use crate::interval::{BusyInterval, QueryWindow};
use crate::pricing::PricingDocument;

/// Free/busy lookup for the venue calendar.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Commitments overlapping `window`, the span queried for `date`.
    /// Order is unspecified.
    async fn busy_intervals(
        &self,
        date: NaiveDate,
        window: &QueryWindow,
    ) -> Result<Vec<BusyInterval>, UpstreamFetchError>;
}

/// Per-host pricing lookup.
#[async_trait]
pub trait PricingSource: Send + Sync {
    /// The host's pricing document. A host with no document is an error.
    async fn pricing(&self, host_id: &str) -> Result<PricingDocument, UpstreamFetchError>;
}

/// A calendar backed by a fixed list of intervals.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendar {
    intervals: Vec<BusyInterval>,
}

impl StaticCalendar {
    pub fn new(intervals: Vec<BusyInterval>) -> Self {
        Self { intervals }
    }
}

#[async_trait]
impl CalendarSource for StaticCalendar {
    async fn busy_intervals(
        &self,
        _date: NaiveDate,
        window: &QueryWindow,
    ) -> Result<Vec<BusyInterval>, UpstreamFetchError> {
        Ok(self
            .intervals
            .iter()
            .filter(|interval| window.overlaps(interval))
            .cloned()
            .collect())
    }
}

/// A stored host record: `{ "_id": 0, "pricing": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    #[serde(rename = "_id", deserialize_with = "host_id_from_any")]
    pub id: String,
    pub pricing: Option<PricingDocument>,
}

/// Host ids arrive as either JSON strings or numbers (`0` and `"0"` are the same host).
pub(crate) fn host_id_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "host id must be a string or number, got {}",
            other
        ))),
    }
}

/// A pricing store held in memory, keyed by host id.
#[derive(Debug, Clone, Default)]
pub struct StaticPricing {
    hosts: HashMap<String, PricingDocument>,
}

impl StaticPricing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host_id: impl Into<String>, document: PricingDocument) -> Self {
        self.hosts.insert(host_id.into(), document);
        self
    }

    /// Index host records by id. Records without a `pricing` section are skipped
    /// and will report as not found.
    pub fn from_records(records: Vec<HostRecord>) -> Self {
        let hosts = records
            .into_iter()
            .filter_map(|record| record.pricing.map(|pricing| (record.id, pricing)))
            .collect();
        Self { hosts }
    }
}

#[async_trait]
impl PricingSource for StaticPricing {
    async fn pricing(&self, host_id: &str) -> Result<PricingDocument, UpstreamFetchError> {
        self.hosts
            .get(host_id)
            .cloned()
            .ok_or_else(|| UpstreamFetchError::HostNotFound(host_id.to_string()))
    }
}
