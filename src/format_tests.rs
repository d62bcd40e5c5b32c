#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::format::*;
use crate::models::YearMonth;

// ── format_currency ───────────────────────────────────────────

#[test]
fn test_format_currency_basic() {
    assert_eq!(format_currency(dec!(1250)), "₹1,250");
}

#[test]
fn test_format_currency_no_commas() {
    assert_eq!(format_currency(dec!(999)), "₹999");
}

#[test]
fn test_format_currency_zero() {
    assert_eq!(format_currency(dec!(0)), "₹0");
}

#[test]
fn test_format_currency_rounds_half_up() {
    assert_eq!(format_currency(dec!(1234567.5)), "₹1,234,568");
    assert_eq!(format_currency(dec!(249.49)), "₹249");
}

#[test]
fn test_format_currency_negative() {
    assert_eq!(format_currency(dec!(-1250.4)), "-₹1,250");
}

#[test]
fn test_format_currency_negative_rounds_to_zero() {
    assert_eq!(format_currency(dec!(-0.4)), "₹0");
}

#[test]
fn test_format_currency_millions() {
    assert_eq!(format_currency(dec!(10000000)), "₹10,000,000");
}

// ── format_percent ────────────────────────────────────────────

#[test]
fn test_format_percent_pads_one_decimal() {
    assert_eq!(format_percent(dec!(20)), "20.0");
    assert_eq!(format_percent(dec!(0)), "0.0");
}

#[test]
fn test_format_percent_rounds() {
    assert_eq!(format_percent(dec!(5.25)), "5.3");
    assert_eq!(format_percent(dec!(33.333)), "33.3");
    assert_eq!(format_percent(dec!(-12.35)), "-12.4");
}

// ── Dates ─────────────────────────────────────────────────────

#[test]
fn test_format_date() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    assert_eq!(format_date(date), "Jan 10, 2024");
}

#[test]
fn test_format_date_pads_day() {
    let date = NaiveDate::from_ymd_opt(2023, 12, 3).unwrap();
    assert_eq!(format_date(date), "Dec 03, 2023");
}

#[test]
fn test_format_month() {
    assert_eq!(format_month(YearMonth::new(2024, 1).unwrap()), "January 2024");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_rupee_amounts() {
    assert_eq!(truncate("₹₹₹₹₹", 3), "₹₹…");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_half() {
    assert_eq!(progress_bar(dec!(50), 10), "[█████░░░░░]");
}

#[test]
fn test_progress_bar_caps_at_full() {
    assert_eq!(progress_bar(dec!(150), 4), "[████]");
}

#[test]
fn test_progress_bar_empty() {
    assert_eq!(progress_bar(dec!(0), 4), "[░░░░]");
    assert_eq!(progress_bar(dec!(-20), 4), "[░░░░]");
}

#[test]
fn test_progress_bar_rounds_down() {
    assert_eq!(progress_bar(dec!(85), 10), "[████████░░]");
}
