use anyhow::{Context, Result};
use chrono::NaiveDate;

/// A calendar month, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct YearMonth {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            anyhow::bail!("Month must be between 1 and 12, got {month}");
        }
        // chrono bounds the representable years
        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| anyhow::anyhow!("Year {year} is out of range"))?;
        Ok(Self { year, month })
    }

    /// The following calendar month, rolling over into the next year.
    pub(crate) fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Human-readable label, e.g. `"January 2024"`.
    pub(crate) fn label(self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl std::str::FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("Expected YYYY-MM, got '{trimmed}'"))?;
        if year.len() != 4 {
            anyhow::bail!("Expected a four-digit year in '{trimmed}'");
        }
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in '{trimmed}'"))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month in '{trimmed}'"))?;
        Self::new(year, month)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Ordered month labels covering a range of months.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Period {
    months: Vec<String>,
}

impl Period {
    #[cfg(test)]
    pub(crate) fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            months: labels.into_iter().map(Into::into).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn months(&self) -> &[String] {
        &self.months
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.months.iter().map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.months.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub(crate) fn position(&self, month: &str) -> Option<usize> {
        self.months.iter().position(|m| m == month)
    }

    pub(crate) fn contains(&self, month: &str) -> bool {
        self.position(month).is_some()
    }

    /// Months strictly before `month`, in order. Empty if `month` is not in the period.
    #[cfg(test)]
    pub(crate) fn before(&self, month: &str) -> &[String] {
        let end = self.position(month).unwrap_or(0);
        &self.months[..end]
    }
}

/// Month labels from `start` to `end` inclusive.
///
/// An inverted range (end before start) produces an empty period; callers
/// that accept user input are expected to reject it first.
pub(crate) fn generate_months(start: YearMonth, end: YearMonth) -> Period {
    let mut months = Vec::new();
    let mut current = start;
    while current <= end {
        months.push(current.label());
        current = current.succ();
    }
    Period { months }
}

/// Reject ranges whose end precedes their start.
pub(crate) fn validate_range(start: YearMonth, end: YearMonth) -> Result<()> {
    if end < start {
        anyhow::bail!("End month {end} is before start month {start}");
    }
    Ok(())
}
