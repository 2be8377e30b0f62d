use std::collections::HashMap;

use super::period::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Category {
    Income,
    Expenses,
}

impl Category {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expenses => "expenses",
        }
    }

    /// Render order of the table sections.
    pub(crate) fn all() -> &'static [Category] {
        &[Self::Income, Self::Expenses]
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expenses => "Expenses",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct RowId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SubRowId(pub(crate) u64);

/// Raw cell text keyed by month label.
pub(crate) type Values = HashMap<String, String>;

pub(crate) fn blank_values(period: &Period) -> Values {
    period.iter().map(|m| (m.to_string(), String::new())).collect()
}

/// Drop months outside `period` and add blank entries for new ones.
pub(crate) fn reconcile_values(values: &mut Values, period: &Period) {
    values.retain(|month, _| period.contains(month));
    for month in period.iter() {
        values.entry(month.to_string()).or_default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubRow {
    pub(crate) id: SubRowId,
    pub(crate) name: String,
    pub(crate) values: Values,
}

impl SubRow {
    pub(crate) fn blank(id: SubRowId, period: &Period) -> Self {
        Self {
            id,
            name: String::new(),
            values: blank_values(period),
        }
    }

    pub(crate) fn value(&self, month: &str) -> &str {
        self.values.get(month).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    pub(crate) id: RowId,
    pub(crate) name: String,
    pub(crate) values: Values,
    pub(crate) sub_rows: Vec<SubRow>,
    pub(crate) category: Category,
    /// Seed rows keep their names.
    pub(crate) protected: bool,
}

impl Row {
    pub(crate) fn new(id: RowId, name: impl Into<String>, category: Category, period: &Period) -> Self {
        Self {
            id,
            name: name.into(),
            values: blank_values(period),
            sub_rows: Vec::new(),
            category,
            protected: false,
        }
    }

    pub(crate) fn value(&self, month: &str) -> &str {
        self.values.get(month).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn sub_row(&self, id: SubRowId) -> Option<&SubRow> {
        self.sub_rows.iter().find(|s| s.id == id)
    }

    pub(crate) fn sub_row_mut(&mut self, id: SubRowId) -> Option<&mut SubRow> {
        self.sub_rows.iter_mut().find(|s| s.id == id)
    }

    /// Find a row by ID in a slice.
    pub(crate) fn find_by_id(rows: &[Row], id: RowId) -> Option<&Row> {
        rows.iter().find(|r| r.id == id)
    }
}
