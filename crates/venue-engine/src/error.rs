//! Error types for venue-engine operations.

use thiserror::Error;

/// A failed call to one of the external collaborators (calendar or pricing store).
///
/// Every fetch is a single attempt; nothing in this crate retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamFetchError {
    #[error("calendar source unavailable: {0}")]
    Calendar(String),

    #[error("no pricing document for host '{0}'")]
    HostNotFound(String),

    #[error("pricing source unavailable: {0}")]
    Pricing(String),
}

#[derive(Error, Debug)]
pub enum BookingError {
    /// Malformed or out-of-range caller input (negative guest count, empty duration).
    #[error("Invalid booking: {0}")]
    Validation(String),

    /// A required pricing field is missing or unusable. Never defaulted.
    #[error("Pricing configuration error: {0}")]
    Configuration(String),

    #[error("Upstream fetch failed: {0}")]
    Upstream(#[from] UpstreamFetchError),
}

pub type Result<T> = std::result::Result<T, BookingError>;
