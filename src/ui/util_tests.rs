#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::app::keep_visible;
use super::util::*;

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
    assert_eq!(truncate("Operational Expenses", 8), "Operati…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── align ─────────────────────────────────────────────────────

#[test]
fn test_align_left_pads() {
    assert_eq!(align_left("Rent", 8), "Rent    ");
}

#[test]
fn test_align_right_pads() {
    assert_eq!(align_right("42", 6), "   42 ");
}

#[test]
fn test_align_keeps_width_when_truncating() {
    let s = align_right("January 2024", 8);
    assert_eq!(s.chars().count(), 8);
    assert_eq!(s, "Januar… ");
    assert_eq!(align_left("General Income", 6).chars().count(), 6);
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_integers() {
    assert_eq!(format_amount(dec!(1300)), "1300");
    assert_eq!(format_amount(dec!(-400)), "-400");
}

#[test]
fn test_format_amount_drops_trailing_zeros() {
    assert_eq!(format_amount(dec!(750.50)), "750.5");
    assert_eq!(format_amount(dec!(12.00)), "12");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(Decimal::ZERO), "0");
    assert_eq!(format_amount(dec!(0.00)), "0");
    assert_eq!(format_amount(dec!(-0.0)), "0");
}

// ── keep_visible ──────────────────────────────────────────────

#[test]
fn test_keep_visible_inside_window() {
    assert_eq!(keep_visible(2, 4, 5), 2);
}

#[test]
fn test_keep_visible_scrolls_down() {
    assert_eq!(keep_visible(0, 7, 5), 3);
}

#[test]
fn test_keep_visible_scrolls_up() {
    assert_eq!(keep_visible(6, 2, 5), 2);
}

#[test]
fn test_keep_visible_zero_page() {
    assert_eq!(keep_visible(0, 3, 0), 3);
}
