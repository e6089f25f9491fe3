//! Tiered hourly pricing with guest, cleaning and add-on fees.
//!
//! Hosts publish a [`PricingDocument`]; it is checked into a strict
//! [`PricingConfig`] before any arithmetic happens. Missing rates are never
//! defaulted.
//!
//! Base rate billing splits a booking at most once, at 17:00. Time before the
//! boundary is billed at the tier of the start hour; everything after it at the
//! tier of `max(start_hour, 17)`. A booking that also crosses 21:00 does not get a
//! third segment.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Timelike, Weekday};
use chrono_tz::Tz;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

pub type Money = Decimal;

/// Hour at which weekend evening pricing begins; also the single split point.
pub const EVENING_START_HOUR: u32 = 17;
/// Hour at which weekend late-night pricing begins.
pub const LATE_NIGHT_START_HOUR: u32 = 21;
/// Guests included before the extra-guest fee and large-group cleaning apply.
pub const INCLUDED_GUESTS: i64 = 19;
/// Add-on billed once per booking rather than per hour.
pub const WHOLE_BOOKING_ADD_ON: &str = "allInclusive";

// ---------------------------------------------------------------------------
// Host configuration
// ---------------------------------------------------------------------------

/// Pricing as stored for a host. Every field is optional here so that a missing
/// field can be reported by name instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingDocument {
    pub base_rate_weekday: Option<Money>,
    pub base_rate_weekend_morning: Option<Money>,
    pub base_rate_weekend_evening: Option<Money>,
    pub base_rate_late_night: Option<Money>,
    pub cleaning_fee: Option<CleaningFeeDocument>,
    pub extra_guest_fee: Option<Vec<GuestFeeTier>>,
    #[serde(default)]
    pub add_ons: BTreeMap<String, Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningFeeDocument {
    pub standard: Option<Money>,
    pub large_group: Option<Money>,
}

/// One row of the extra-guest table. Rows are matched in the order given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestFeeTier {
    #[serde(alias = "guestCount")]
    pub guest_count_threshold: u32,
    #[serde(alias = "additionalFeePerHour")]
    pub additional_fee_per_guest: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleaningFee {
    pub standard: Money,
    pub large_group: Money,
}

/// Validated pricing for one host.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub base_rate_weekday: Money,
    pub base_rate_weekend_morning: Money,
    pub base_rate_weekend_evening: Money,
    pub base_rate_late_night: Money,
    pub cleaning_fee: CleaningFee,
    pub extra_guest_fee: Vec<GuestFeeTier>,
    pub add_ons: BTreeMap<String, Money>,
}

fn required(value: Option<Money>, field: &str) -> Result<Money> {
    let value =
        value.ok_or_else(|| BookingError::Configuration(format!("missing field '{}'", field)))?;
    if value.is_sign_negative() {
        return Err(BookingError::Configuration(format!(
            "field '{}' is negative ({})",
            field, value
        )));
    }
    Ok(value)
}

impl PricingDocument {
    /// Check every required field and produce a [`PricingConfig`].
    pub fn validate(&self) -> Result<PricingConfig> {
        let base_rate_weekday = required(self.base_rate_weekday, "baseRateWeekday")?;
        let base_rate_weekend_morning =
            required(self.base_rate_weekend_morning, "baseRateWeekendMorning")?;
        let base_rate_weekend_evening =
            required(self.base_rate_weekend_evening, "baseRateWeekendEvening")?;
        let base_rate_late_night = required(self.base_rate_late_night, "baseRateLateNight")?;

        let cleaning = self
            .cleaning_fee
            .as_ref()
            .ok_or_else(|| BookingError::Configuration("missing field 'cleaningFee'".into()))?;
        let cleaning_fee = CleaningFee {
            standard: required(cleaning.standard, "cleaningFee.standard")?,
            large_group: required(cleaning.large_group, "cleaningFee.largeGroup")?,
        };

        let extra_guest_fee = self
            .extra_guest_fee
            .clone()
            .ok_or_else(|| BookingError::Configuration("missing field 'extraGuestFee'".into()))?;
        for tier in &extra_guest_fee {
            required(Some(tier.additional_fee_per_guest), "extraGuestFee.additionalFeePerGuest")?;
        }
        for (name, cost) in &self.add_ons {
            required(Some(*cost), &format!("addOns.{}", name))?;
        }

        Ok(PricingConfig {
            base_rate_weekday,
            base_rate_weekend_morning,
            base_rate_weekend_evening,
            base_rate_late_night,
            cleaning_fee,
            extra_guest_fee,
            add_ons: self.add_ons.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Rate tiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateTier {
    Weekday,
    WeekendMorning,
    WeekendEvening,
    LateNight,
}

impl RateTier {
    /// The tier for a booking hour. Friday and Saturday are weekend days; every
    /// other day bills the weekday rate at any hour.
    pub fn at(weekday: Weekday, hour: u32) -> Self {
        match weekday {
            Weekday::Fri | Weekday::Sat => match hour {
                h if h < EVENING_START_HOUR => RateTier::WeekendMorning,
                h if h < LATE_NIGHT_START_HOUR => RateTier::WeekendEvening,
                _ => RateTier::LateNight,
            },
            _ => RateTier::Weekday,
        }
    }

    pub fn hourly_rate(self, config: &PricingConfig) -> Money {
        match self {
            RateTier::Weekday => config.base_rate_weekday,
            RateTier::WeekendMorning => config.base_rate_weekend_morning,
            RateTier::WeekendEvening => config.base_rate_weekend_evening,
            RateTier::LateNight => config.base_rate_late_night,
        }
    }
}

/// A run of hours billed at one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSegment {
    pub tier: RateTier,
    pub hours: Decimal,
}

/// Split `duration_hours` starting at local `start_hour` on `weekday` into at most
/// two billed segments around the 17:00 boundary.
pub fn rate_segments(
    weekday: Weekday,
    start_hour: u32,
    duration_hours: Decimal,
) -> Vec<RateSegment> {
    let before_boundary = (Decimal::from(EVENING_START_HOUR) - Decimal::from(start_hour))
        .max(Decimal::ZERO)
        .min(duration_hours);
    let remainder = duration_hours - before_boundary;

    let mut segments = Vec::with_capacity(2);
    if before_boundary > Decimal::ZERO {
        segments.push(RateSegment {
            tier: RateTier::at(weekday, start_hour),
            hours: before_boundary,
        });
    }
    if remainder > Decimal::ZERO {
        segments.push(RateSegment {
            tier: RateTier::at(weekday, start_hour.max(EVENING_START_HOUR)),
            hours: remainder,
        });
    }
    segments
}

// ---------------------------------------------------------------------------
// Price computation
// ---------------------------------------------------------------------------

/// Itemized price for one booking. Amounts are rounded to cents per line item and
/// `total` is their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub duration_hours: Decimal,
    pub base_rate: Money,
    pub guest_fee: Money,
    pub cleaning_fee: Money,
    pub add_ons: BTreeMap<String, Money>,
    pub total: Money,
}

fn cents(amount: Decimal) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Booking length in hours. An end at or before the start is read as crossing
/// midnight and moved forward one day, once.
pub fn duration_hours(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Result<Decimal> {
    let end = if end <= start {
        *end + Duration::hours(24)
    } else {
        *end
    };
    if end <= *start {
        return Err(BookingError::Validation(format!(
            "end {} is not after start {} even across midnight",
            end, start
        )));
    }
    Ok(Decimal::from((end - *start).num_seconds()) / Decimal::from(3600))
}

/// Price a booking against a host's stored pricing document.
///
/// The document is validated before anything else, so a missing rate fails the
/// whole quote without producing a partial breakdown.
pub fn compute_price(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
    guest_count: i64,
    add_ons: &BTreeMap<String, bool>,
    document: &PricingDocument,
) -> Result<PriceBreakdown> {
    let config = document.validate()?;
    config.price(start, end, guest_count, add_ons)
}

impl PricingConfig {
    /// Price a booking. `start` and `end` must be in the venue's timezone; the
    /// weekday and hour used for tiering are read from `start` in that zone.
    pub fn price(
        &self,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
        guest_count: i64,
        add_ons: &BTreeMap<String, bool>,
    ) -> Result<PriceBreakdown> {
        if guest_count < 0 {
            return Err(BookingError::Validation(format!(
                "guest count must not be negative (got {})",
                guest_count
            )));
        }
        let hours = duration_hours(start, end)?;

        let base_rate = cents(
            rate_segments(start.weekday(), start.hour(), hours)
                .iter()
                .map(|segment| segment.tier.hourly_rate(self) * segment.hours)
                .sum(),
        );

        let large_group = guest_count > INCLUDED_GUESTS;
        let guest_fee = if large_group {
            cents(Decimal::from(guest_count - INCLUDED_GUESTS) * self.extra_guest_rate(guest_count))
        } else {
            Decimal::ZERO
        };
        let cleaning_fee = if large_group {
            self.cleaning_fee.large_group
        } else {
            self.cleaning_fee.standard
        };

        let add_on_costs: BTreeMap<String, Money> = add_ons
            .iter()
            .filter(|(_, enabled)| **enabled)
            .filter_map(|(name, _)| {
                let unit = self.add_ons.get(name)?;
                let cost = if name == WHOLE_BOOKING_ADD_ON {
                    *unit
                } else {
                    *unit * hours
                };
                Some((name.clone(), cents(cost)))
            })
            .collect();

        let total = base_rate + guest_fee + cleaning_fee + add_on_costs.values().sum::<Money>();

        Ok(PriceBreakdown {
            duration_hours: hours,
            base_rate,
            guest_fee,
            cleaning_fee,
            add_ons: add_on_costs,
            total,
        })
    }

    /// Per-guest fee from the first table row whose threshold the party meets,
    /// scanning in stored order. Zero if no row applies.
    pub fn extra_guest_rate(&self, guest_count: i64) -> Money {
        self.extra_guest_fee
            .iter()
            .find(|tier| i64::from(tier.guest_count_threshold) <= guest_count)
            .map(|tier| tier.additional_fee_per_guest)
            .unwrap_or(Decimal::ZERO)
    }
}
