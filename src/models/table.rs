use super::period::Period;
use super::row::{reconcile_values, Category, Row, RowId, SubRow, SubRowId};

pub(crate) const NEW_CATEGORY_NAME: &str = "New Category";

const SEED_ROWS: [(&str, Category); 3] = [
    ("General Income", Category::Income),
    ("Other Income", Category::Income),
    ("Operational Expenses", Category::Expenses),
];

/// A single edit to the table, for callers that dispatch edits as values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    RenameRow {
        row: RowId,
        name: String,
    },
    RenameSubRow {
        row: RowId,
        sub_row: SubRowId,
        name: String,
    },
    SetCell {
        row: RowId,
        month: String,
        text: String,
    },
    SetSubCell {
        row: RowId,
        sub_row: SubRowId,
        month: String,
        text: String,
    },
    CommitNewSubRow {
        row: RowId,
    },
    AddCategoryRow {
        category: Category,
    },
    DeleteRow {
        row: RowId,
    },
    DeleteSubRow {
        row: RowId,
        sub_row: SubRowId,
    },
    FillRow {
        row: RowId,
        sub_row: Option<SubRowId>,
        text: String,
    },
}

/// The budget rows and their nested line items.
///
/// Every edit consumes the table and returns the next state. Unknown ids
/// leave the state unchanged; no operation fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BudgetTable {
    rows: Vec<Row>,
    next_id: u64,
}

impl BudgetTable {
    /// The three protected seed rows with a blank value for every month.
    pub(crate) fn seeded(period: &Period) -> Self {
        let mut table = Self::default();
        for (name, category) in SEED_ROWS {
            let id = table.allocate_row_id();
            let mut row = Row::new(id, name, category, period);
            row.protected = true;
            table.rows.push(row);
        }
        table
    }

    pub(crate) fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub(crate) fn row(&self, id: RowId) -> Option<&Row> {
        Row::find_by_id(&self.rows, id)
    }

    /// Rows of one category in table order.
    pub(crate) fn rows_in(&self, category: Category) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(move |r| r.category == category)
    }

    /// Raw text of a row or sub-row cell; empty when the cell does not exist.
    pub(crate) fn cell_text(&self, row: RowId, sub_row: Option<SubRowId>, month: &str) -> &str {
        let Some(r) = self.row(row) else {
            return "";
        };
        match sub_row {
            None => r.value(month),
            Some(sid) => r.sub_row(sid).map(|s| s.value(month)).unwrap_or(""),
        }
    }

    fn allocate_row_id(&mut self) -> RowId {
        self.next_id += 1;
        RowId(self.next_id)
    }

    fn allocate_sub_row_id(&mut self) -> SubRowId {
        self.next_id += 1;
        SubRowId(self.next_id)
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    #[must_use]
    pub(crate) fn rename_row(mut self, row: RowId, name: &str) -> Self {
        match self.row_mut(row) {
            Some(r) if r.protected => {
                tracing::debug!(row = row.0, name = %r.name, "ignored rename of protected row");
            }
            Some(r) => r.name = name.to_string(),
            None => {}
        }
        self
    }

    #[must_use]
    pub(crate) fn rename_sub_row(mut self, row: RowId, sub_row: SubRowId, name: &str) -> Self {
        if let Some(s) = self.row_mut(row).and_then(|r| r.sub_row_mut(sub_row)) {
            s.name = name.to_string();
        }
        self
    }

    /// Store `text` verbatim. Months that are not already keyed are ignored.
    #[must_use]
    pub(crate) fn set_cell(mut self, row: RowId, month: &str, text: &str) -> Self {
        if let Some(cell) = self.row_mut(row).and_then(|r| r.values.get_mut(month)) {
            *cell = text.to_string();
        }
        self
    }

    #[must_use]
    pub(crate) fn set_sub_cell(mut self, row: RowId, sub_row: SubRowId, month: &str, text: &str) -> Self {
        if let Some(cell) = self
            .row_mut(row)
            .and_then(|r| r.sub_row_mut(sub_row))
            .and_then(|s| s.values.get_mut(month))
        {
            *cell = text.to_string();
        }
        self
    }

    /// Append a blank line item, but only under a row with a non-blank name.
    #[must_use]
    pub(crate) fn commit_new_sub_row(mut self, row: RowId, period: &Period) -> Self {
        let named = self.row(row).is_some_and(|r| !r.name.trim().is_empty());
        if !named {
            return self;
        }
        let id = self.allocate_sub_row_id();
        if let Some(r) = self.row_mut(row) {
            r.sub_rows.push(SubRow::blank(id, period));
            tracing::debug!(row = row.0, sub_row = id.0, "added sub-row");
        }
        self
    }

    #[must_use]
    pub(crate) fn add_category_row(mut self, category: Category, period: &Period) -> Self {
        let id = self.allocate_row_id();
        self.rows.push(Row::new(id, NEW_CATEGORY_NAME, category, period));
        tracing::debug!(row = id.0, %category, "added category row");
        self
    }

    #[must_use]
    pub(crate) fn delete_row(mut self, row: RowId) -> Self {
        self.rows.retain(|r| r.id != row);
        self
    }

    #[must_use]
    pub(crate) fn delete_sub_row(mut self, row: RowId, sub_row: SubRowId) -> Self {
        if let Some(r) = self.row_mut(row) {
            r.sub_rows.retain(|s| s.id != sub_row);
        }
        self
    }

    /// Set every month of one row, or of one of its sub-rows, to `text`.
    #[must_use]
    pub(crate) fn fill_row(mut self, row: RowId, sub_row: Option<SubRowId>, text: &str) -> Self {
        if let Some(r) = self.row_mut(row) {
            let values = match sub_row {
                None => Some(&mut r.values),
                Some(sid) => r.sub_row_mut(sid).map(|s| &mut s.values),
            };
            for cell in values.into_iter().flat_map(|v| v.values_mut()) {
                *cell = text.to_string();
            }
        }
        self
    }

    /// Re-key every row and sub-row to exactly the months of `period`.
    #[must_use]
    pub(crate) fn with_period(mut self, period: &Period) -> Self {
        for row in &mut self.rows {
            reconcile_values(&mut row.values, period);
            for sub in &mut row.sub_rows {
                reconcile_values(&mut sub.values, period);
            }
        }
        self
    }

    #[must_use]
    pub(crate) fn apply(self, action: &Action, period: &Period) -> Self {
        tracing::debug!(?action, "apply");
        match action {
            Action::RenameRow { row, name } => self.rename_row(*row, name),
            Action::RenameSubRow { row, sub_row, name } => self.rename_sub_row(*row, *sub_row, name),
            Action::SetCell { row, month, text } => self.set_cell(*row, month, text),
            Action::SetSubCell {
                row,
                sub_row,
                month,
                text,
            } => self.set_sub_cell(*row, *sub_row, month, text),
            Action::CommitNewSubRow { row } => self.commit_new_sub_row(*row, period),
            Action::AddCategoryRow { category } => self.add_category_row(*category, period),
            Action::DeleteRow { row } => self.delete_row(*row),
            Action::DeleteSubRow { row, sub_row } => self.delete_sub_row(*row, *sub_row),
            Action::FillRow { row, sub_row, text } => self.fill_row(*row, *sub_row, text),
        }
    }
}
