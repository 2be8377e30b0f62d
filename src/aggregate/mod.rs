//! Derived figures for the budget table.
//!
//! Every function here is pure and recomputes from the rows it is given.
//! Sums saturate at the `Decimal` bounds, so no cell text can make them fail.
//! Renderers that need a whole column of balances should use [`Summary`],
//! which walks the period once instead of re-summing prior months per cell.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{Category, Period, Row};

/// Best-effort numeric reading of a raw cell.
///
/// Only the leading `[+-]?digits(.digits)?` part of the trimmed text counts:
/// "12abc" and "7 units" read as their prefix, "1e3" reads as 1, and blank
/// or non-numeric text is zero.
pub(crate) fn parse_amount(text: &str) -> Decimal {
    Decimal::from_str(numeric_prefix(text.trim())).unwrap_or(Decimal::ZERO)
}

/// Longest leading `[+-]?digits(.digits)?` slice of `s`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return "";
    }
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    &s[..end]
}

/// Numeric value of a row's own cell for `month`.
pub(crate) fn row_value(row: &Row, month: &str) -> Decimal {
    parse_amount(row.value(month))
}

/// A row's own value plus all of its line items for `month`.
fn row_with_sub_rows(row: &Row, month: &str) -> Decimal {
    row.sub_rows
        .iter()
        .map(|s| parse_amount(s.value(month)))
        .fold(row_value(row, month), Decimal::saturating_add)
}

/// Sum over every row called `name`, sub-rows included.
///
/// Rows are grouped by name, so two rows that share a name share a sub-total.
pub(crate) fn sub_total(rows: &[Row], name: &str, month: &str) -> Decimal {
    rows.iter()
        .filter(|r| r.name == name)
        .map(|r| row_with_sub_rows(r, month))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

pub(crate) fn category_total(rows: &[Row], month: &str, category: Category) -> Decimal {
    rows.iter()
        .filter(|r| r.category == category)
        .map(|r| row_with_sub_rows(r, month))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Income minus expenses for `month`.
pub(crate) fn profit(rows: &[Row], month: &str) -> Decimal {
    category_total(rows, month, Category::Income)
        .saturating_sub(category_total(rows, month, Category::Expenses))
}

/// Profit carried in from every month before `month`.
///
/// Quadratic over the period; [`Summary`] is the one-pass equivalent the
/// renderers use.
#[cfg(test)]
pub(crate) fn opening_balance(rows: &[Row], period: &Period, month: &str) -> Decimal {
    period
        .before(month)
        .iter()
        .map(|m| profit(rows, m))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

#[cfg(test)]
pub(crate) fn closing_balance(rows: &[Row], period: &Period, month: &str) -> Decimal {
    opening_balance(rows, period, month).saturating_add(profit(rows, month))
}

/// Totals for one month of the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct MonthTotals {
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) profit: Decimal,
    pub(crate) opening: Decimal,
    pub(crate) closing: Decimal,
}

/// Per-month totals for a whole period, computed in one forward pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    months: Vec<(String, MonthTotals)>,
}

impl Summary {
    pub(crate) fn compute(rows: &[Row], period: &Period) -> Self {
        let mut running = Decimal::ZERO;
        let months = period
            .iter()
            .map(|month| {
                let net = profit(rows, month);
                let totals = MonthTotals {
                    income: category_total(rows, month, Category::Income),
                    expenses: category_total(rows, month, Category::Expenses),
                    profit: net,
                    opening: running,
                    closing: running.saturating_add(net),
                };
                running = totals.closing;
                (month.to_string(), totals)
            })
            .collect();
        Self { months }
    }

    pub(crate) fn get(&self, month: &str) -> MonthTotals {
        self.months
            .iter()
            .find(|(m, _)| m == month)
            .map(|(_, t)| *t)
            .unwrap_or_default()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &MonthTotals)> {
        self.months.iter().map(|(m, t)| (m.as_str(), t))
    }

    /// Closing balance of the last month, zero for an empty period.
    pub(crate) fn final_balance(&self) -> Decimal {
        self.months
            .last()
            .map(|(_, t)| t.closing)
            .unwrap_or(Decimal::ZERO)
    }
}
