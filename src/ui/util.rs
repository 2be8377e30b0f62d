use rust_decimal::Decimal;

/// Plain rendering of a total: no currency symbol, no trailing zeros.
/// e.g. `1300.50` → `"1300.5"`, `-0` → `"0"`
pub(crate) fn format_amount(val: Decimal) -> String {
    if val.is_zero() {
        return "0".to_string();
    }
    val.normalize().to_string()
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max - 1).collect();
    format!("{truncated}…")
}

/// Fit `s` into exactly `width` columns, padded on the right.
/// One column is kept free as a cell separator.
pub(crate) fn align_left(s: &str, width: usize) -> String {
    let inner = width.saturating_sub(1);
    format!("{:<inner$} ", truncate(s, inner))
}

/// Fit `s` into exactly `width` columns, padded on the left.
pub(crate) fn align_right(s: &str, width: usize) -> String {
    let inner = width.saturating_sub(1);
    format!("{:>inner$} ", truncate(s, inner))
}
