//! # venue-engine
//!
//! Availability slots and tiered pricing for hourly venue rentals.
//!
//! Given the venue calendar's busy intervals for a day, the engine decides which
//! start and end times a customer may pick. Given a confirmed booking, it computes
//! an itemized price from the host's rate card. Both steps are pure; only the
//! fetches behind [`session::BookingSession`] are async.
//!
//! ## Modules
//!
//! - [`clock`] — "2:00 PM" labels ↔ hour-of-day on the extended 0–26 scale
//! - [`local`] — anchoring wall-clock hours in the venue timezone (DST-aware)
//! - [`interval`] — busy intervals and the calendar query window
//! - [`availability`] — per-hour free/busy flags for a venue day
//! - [`slots`] — offered start and end slots
//! - [`pricing`] — rate tiers, boundary split, guest/cleaning/add-on fees
//! - [`booking`] — booking requests
//! - [`source`] — calendar and pricing collaborators
//! - [`session`] — memoizing fetch-then-compute session
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod clock;
pub mod error;
pub mod interval;
pub mod local;
pub mod pricing;
pub mod session;
pub mod slots;
pub mod source;

pub use availability::DayAvailability;
pub use booking::BookingRequest;
pub use error::{BookingError, UpstreamFetchError};
pub use interval::{day_window, BusyInterval};
pub use pricing::{compute_price, PriceBreakdown, PricingConfig, PricingDocument, RateTier};
pub use session::BookingSession;
pub use slots::{end_slots, offered_end_slots, start_slots, TimeSlot};
pub use source::{CalendarSource, PricingSource, StaticCalendar, StaticPricing};
