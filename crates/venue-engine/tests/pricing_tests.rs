//! Tests for the pricing engine.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};
use chrono_tz::America::Chicago;
use chrono_tz::Tz;
use rust_decimal_macros::dec;
use venue_engine::pricing::{
    compute_price, CleaningFeeDocument, GuestFeeTier, PricingDocument, WHOLE_BOOKING_ADD_ON,
};
use venue_engine::BookingError;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn document() -> PricingDocument {
    PricingDocument {
        base_rate_weekday: Some(dec!(100)),
        base_rate_weekend_morning: Some(dec!(120)),
        base_rate_weekend_evening: Some(dec!(150)),
        base_rate_late_night: Some(dec!(180)),
        cleaning_fee: Some(CleaningFeeDocument {
            standard: Some(dec!(50)),
            large_group: Some(dec!(100)),
        }),
        extra_guest_fee: Some(vec![GuestFeeTier {
            guest_count_threshold: 20,
            additional_fee_per_guest: dec!(5),
        }]),
        add_ons: BTreeMap::from([
            ("projector".to_string(), dec!(10)),
            (WHOLE_BOOKING_ADD_ON.to_string(), dec!(200)),
        ]),
    }
}

/// 2026-03-16 is a Monday; 2026-03-20 a Friday; 2026-03-21 a Saturday.
fn local(day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
    Chicago.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
}

fn no_add_ons() -> BTreeMap<String, bool> {
    BTreeMap::new()
}

// ── Base rate ───────────────────────────────────────────────────────────────

#[test]
fn one_hour_weekday_with_small_party_costs_base_rate_plus_cleaning() {
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 11, 0), 10, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.base_rate, dec!(100));
    assert_eq!(breakdown.guest_fee, dec!(0));
    assert_eq!(breakdown.cleaning_fee, dec!(50));
    assert_eq!(breakdown.total, dec!(150));
}

#[test]
fn one_hour_weekday_total_equals_weekday_rate_when_cleaning_is_free() {
    let mut doc = document();
    doc.cleaning_fee = Some(CleaningFeeDocument {
        standard: Some(dec!(0)),
        large_group: Some(dec!(0)),
    });
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 11, 0), 10, &no_add_ons(), &doc).unwrap();

    assert_eq!(breakdown.total, dec!(100));
    assert_eq!(breakdown.guest_fee, dec!(0));
}

#[test]
fn weekday_rate_applies_all_evening() {
    let breakdown =
        compute_price(&local(16, 15, 0), &local(16, 22, 0), 5, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.base_rate, dec!(700));
}

#[test]
fn weekend_booking_splits_at_five_pm() {
    // Friday 16:00-18:00: one hour morning, one hour evening.
    let breakdown =
        compute_price(&local(20, 16, 0), &local(20, 18, 0), 5, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.base_rate, dec!(120) + dec!(150));
}

#[test]
fn weekend_morning_booking_before_boundary_is_one_tier() {
    let breakdown =
        compute_price(&local(21, 10, 0), &local(21, 13, 0), 5, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.base_rate, dec!(360));
}

#[test]
fn weekend_late_night_start_bills_late_night_rate() {
    // Saturday 21:00 to 01:00 Sunday.
    let breakdown =
        compute_price(&local(21, 21, 0), &local(22, 1, 0), 5, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.duration_hours, dec!(4));
    assert_eq!(breakdown.base_rate, dec!(720));
}

#[test]
fn crossing_both_boundaries_keeps_single_split() {
    // Friday 15:00-23:00: 2h morning, then 6h at evening rate (no late-night segment).
    let breakdown =
        compute_price(&local(20, 15, 0), &local(20, 23, 0), 5, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.base_rate, dec!(120) * dec!(2) + dec!(150) * dec!(6));
}

#[test]
fn fractional_hours_are_billed_pro_rata() {
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 11, 30), 5, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.duration_hours, dec!(1.5));
    assert_eq!(breakdown.base_rate, dec!(150));
}

// ── Midnight rollover ───────────────────────────────────────────────────────

#[test]
fn end_before_start_crosses_midnight() {
    // Monday 22:00 with an end of "01:00" on the same date.
    let breakdown =
        compute_price(&local(16, 22, 0), &local(16, 1, 0), 5, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.duration_hours, dec!(3));
}

#[test]
fn end_equal_to_start_is_a_full_day_applied_once() {
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 10, 0), 5, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.duration_hours, dec!(24));
}

#[test]
fn end_more_than_a_day_before_start_is_rejected() {
    let err = compute_price(&local(17, 10, 0), &local(16, 9, 0), 5, &no_add_ons(), &document())
        .unwrap_err();

    assert!(matches!(err, BookingError::Validation(_)));
}

// ── Guests and cleaning ─────────────────────────────────────────────────────

#[test]
fn large_party_pays_per_extra_guest_and_large_cleaning() {
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 13, 0), 25, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.guest_fee, dec!(30));
    assert_eq!(breakdown.cleaning_fee, dec!(100));
    assert_eq!(breakdown.total, dec!(300) + dec!(30) + dec!(100));
}

#[test]
fn nineteen_guests_is_still_a_standard_party() {
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 11, 0), 19, &no_add_ons(), &document()).unwrap();

    assert_eq!(breakdown.guest_fee, dec!(0));
    assert_eq!(breakdown.cleaning_fee, dec!(50));
}

#[test]
fn guest_table_uses_first_match_in_stored_order() {
    let mut doc = document();
    doc.extra_guest_fee = Some(vec![
        GuestFeeTier {
            guest_count_threshold: 20,
            additional_fee_per_guest: dec!(5),
        },
        GuestFeeTier {
            guest_count_threshold: 40,
            additional_fee_per_guest: dec!(8),
        },
    ]);

    // 45 guests meets both thresholds; the first row wins.
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 11, 0), 45, &no_add_ons(), &doc).unwrap();
    assert_eq!(breakdown.guest_fee, dec!(26) * dec!(5));
}

#[test]
fn guest_fee_is_zero_when_no_threshold_matches() {
    let mut doc = document();
    doc.extra_guest_fee = Some(vec![GuestFeeTier {
        guest_count_threshold: 50,
        additional_fee_per_guest: dec!(5),
    }]);

    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 11, 0), 25, &no_add_ons(), &doc).unwrap();
    assert_eq!(breakdown.guest_fee, dec!(0));
    assert_eq!(breakdown.cleaning_fee, dec!(100));
}

#[test]
fn guest_fee_does_not_scale_with_duration() {
    let short =
        compute_price(&local(16, 10, 0), &local(16, 11, 0), 25, &no_add_ons(), &document()).unwrap();
    let long =
        compute_price(&local(16, 10, 0), &local(16, 18, 0), 25, &no_add_ons(), &document()).unwrap();

    assert_eq!(short.guest_fee, long.guest_fee);
}

#[test]
fn negative_guest_count_is_rejected() {
    let err = compute_price(&local(16, 10, 0), &local(16, 11, 0), -1, &no_add_ons(), &document())
        .unwrap_err();

    assert!(matches!(err, BookingError::Validation(_)));
}

// ── Add-ons ─────────────────────────────────────────────────────────────────

#[test]
fn hourly_add_on_scales_with_duration_and_flat_add_on_does_not() {
    let add_ons = BTreeMap::from([
        ("projector".to_string(), true),
        (WHOLE_BOOKING_ADD_ON.to_string(), true),
    ]);
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 13, 0), 5, &add_ons, &document()).unwrap();

    assert_eq!(breakdown.add_ons["projector"], dec!(30));
    assert_eq!(breakdown.add_ons[WHOLE_BOOKING_ADD_ON], dec!(200));
    assert_eq!(breakdown.total, dec!(300) + dec!(50) + dec!(30) + dec!(200));
}

#[test]
fn disabled_and_unknown_add_ons_are_ignored() {
    let add_ons = BTreeMap::from([
        ("projector".to_string(), false),
        ("fog machine".to_string(), true),
    ]);
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 11, 0), 5, &add_ons, &document()).unwrap();

    assert!(breakdown.add_ons.is_empty());
    assert_eq!(breakdown.total, dec!(150));
}

// ── Configuration errors ────────────────────────────────────────────────────

#[test]
fn missing_cleaning_fee_fails_before_any_arithmetic() {
    let mut doc = document();
    doc.cleaning_fee = None;

    // Even an otherwise-invalid request reports the configuration problem first.
    let err = compute_price(&local(16, 10, 0), &local(16, 11, 0), -5, &no_add_ons(), &doc)
        .unwrap_err();
    match err {
        BookingError::Configuration(msg) => assert!(msg.contains("cleaningFee")),
        other => panic!("expected configuration error, got {:?}", other),
    }
}

fn assert_reports_missing(field: &str, strip: impl FnOnce(&mut PricingDocument)) {
    let mut doc = document();
    strip(&mut doc);
    let err = doc.validate().unwrap_err();
    assert!(
        matches!(&err, BookingError::Configuration(msg) if msg.contains(field)),
        "{} not reported: {:?}",
        field,
        err
    );
}

#[test]
fn each_required_field_is_checked() {
    assert_reports_missing("baseRateWeekday", |d| d.base_rate_weekday = None);
    assert_reports_missing("baseRateWeekendMorning", |d| d.base_rate_weekend_morning = None);
    assert_reports_missing("baseRateWeekendEvening", |d| d.base_rate_weekend_evening = None);
    assert_reports_missing("baseRateLateNight", |d| d.base_rate_late_night = None);
    assert_reports_missing("extraGuestFee", |d| d.extra_guest_fee = None);
    assert_reports_missing("cleaningFee.largeGroup", |d| {
        d.cleaning_fee = Some(CleaningFeeDocument {
            standard: Some(dec!(50)),
            large_group: None,
        })
    });
}

#[test]
fn negative_rate_is_a_configuration_error() {
    let mut doc = document();
    doc.base_rate_weekday = Some(dec!(-10));

    assert!(matches!(doc.validate(), Err(BookingError::Configuration(_))));
}

#[test]
fn pricing_document_reads_stored_json_with_legacy_guest_fields() {
    let json = r#"{
        "baseRateWeekday": 100,
        "baseRateWeekendMorning": 120,
        "baseRateWeekendEvening": 150,
        "baseRateLateNight": 180,
        "cleaningFee": { "standard": 50, "largeGroup": 100 },
        "extraGuestFee": [ { "guestCount": 20, "additionalFeePerHour": 5 } ],
        "addOns": { "allInclusive": 200 }
    }"#;
    let doc: PricingDocument = serde_json::from_str(json).unwrap();
    let config = doc.validate().unwrap();

    assert_eq!(config.extra_guest_fee[0].guest_count_threshold, 20);
    assert_eq!(config.extra_guest_fee[0].additional_fee_per_guest, dec!(5));
    assert_eq!(config.add_ons[WHOLE_BOOKING_ADD_ON], dec!(200));
}

#[test]
fn breakdown_serializes_with_camel_case_keys() {
    let breakdown =
        compute_price(&local(16, 10, 0), &local(16, 11, 0), 5, &no_add_ons(), &document()).unwrap();
    let json = serde_json::to_value(&breakdown).unwrap();

    assert_eq!(json["baseRate"], 100.0);
    assert_eq!(json["cleaningFee"], 50.0);
    assert_eq!(json["total"], 150.0);
}
