//! Focus movement across the editable cells of the budget table.
//!
//! [`CellGrid`] lays the table out in render order (each category's rows,
//! each followed by its sub-rows) and indexes every [`CellRef`] to its
//! position. [`Navigator`] owns the focused cell and turns directional keys
//! into moves on that grid.

use std::collections::HashMap;

use crate::models::{BudgetTable, Category, Period, RowId, SubRowId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Column {
    /// The row-name cell, left of the first month.
    Name,
    Month(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CellRef {
    pub(crate) row: RowId,
    pub(crate) sub_row: Option<SubRowId>,
    pub(crate) column: Column,
}

impl CellRef {
    pub(crate) fn month(&self) -> Option<&str> {
        match &self.column {
            Column::Name => None,
            Column::Month(m) => Some(m),
        }
    }
}

/// One visual line of editable cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GridLine {
    pub(crate) row: RowId,
    pub(crate) sub_row: Option<SubRowId>,
}

/// Registry of every editable cell, keyed by structured reference.
#[derive(Debug, Clone, Default)]
pub(crate) struct CellGrid {
    lines: Vec<GridLine>,
    columns: Vec<Column>,
    index: HashMap<CellRef, (usize, usize)>,
}

impl CellGrid {
    pub(crate) fn build(table: &BudgetTable, period: &Period) -> Self {
        let mut lines = Vec::new();
        for category in Category::all() {
            for row in table.rows_in(*category) {
                lines.push(GridLine {
                    row: row.id,
                    sub_row: None,
                });
                lines.extend(row.sub_rows.iter().map(|s| GridLine {
                    row: row.id,
                    sub_row: Some(s.id),
                }));
            }
        }

        let columns: Vec<Column> = std::iter::once(Column::Name)
            .chain(period.iter().map(|m| Column::Month(m.to_string())))
            .collect();

        let mut index = HashMap::new();
        for (li, line) in lines.iter().enumerate() {
            for (ci, column) in columns.iter().enumerate() {
                index.insert(Self::make_ref(line, column), (li, ci));
            }
        }

        Self {
            lines,
            columns,
            index,
        }
    }

    fn make_ref(line: &GridLine, column: &Column) -> CellRef {
        CellRef {
            row: line.row,
            sub_row: line.sub_row,
            column: column.clone(),
        }
    }

    pub(crate) fn lines(&self) -> &[GridLine] {
        &self.lines
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub(crate) fn position(&self, cell: &CellRef) -> Option<(usize, usize)> {
        self.index.get(cell).copied()
    }

    pub(crate) fn contains(&self, cell: &CellRef) -> bool {
        self.index.contains_key(cell)
    }

    pub(crate) fn cell_at(&self, line: usize, column: usize) -> Option<CellRef> {
        let l = self.lines.get(line)?;
        let c = self.columns.get(column)?;
        Some(Self::make_ref(l, c))
    }

    /// Column index of `column`, if it exists in this grid.
    pub(crate) fn column_index(&self, column: &Column) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub(crate) fn first(&self) -> Option<CellRef> {
        self.cell_at(0, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Commit,
    Delete,
}

/// What the caller should do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NavEffect {
    None,
    Moved(CellRef),
    Commit(RowId),
    Delete {
        row: RowId,
        sub_row: Option<SubRowId>,
    },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Navigator {
    focus: Option<CellRef>,
}

impl Navigator {
    pub(crate) fn focus(&self) -> Option<&CellRef> {
        self.focus.as_ref()
    }

    /// Focus `cell` if the grid has it.
    pub(crate) fn focus_on(&mut self, grid: &CellGrid, cell: CellRef) -> bool {
        if grid.contains(&cell) {
            self.focus = Some(cell);
            true
        } else {
            false
        }
    }

    pub(crate) fn handle(&mut self, grid: &CellGrid, key: NavKey) -> NavEffect {
        let Some(focus) = self.focus.clone() else {
            return NavEffect::None;
        };
        match key {
            NavKey::Commit => NavEffect::Commit(focus.row),
            NavKey::Delete => NavEffect::Delete {
                row: focus.row,
                sub_row: focus.sub_row,
            },
            NavKey::Up | NavKey::Down | NavKey::Left | NavKey::Right => {
                match Self::destination(grid, &focus, key) {
                    Some(next) => {
                        self.focus = Some(next.clone());
                        NavEffect::Moved(next)
                    }
                    None => NavEffect::None,
                }
            }
        }
    }

    fn destination(grid: &CellGrid, focus: &CellRef, key: NavKey) -> Option<CellRef> {
        let (line, column) = grid.position(focus)?;
        let (line, column) = match key {
            NavKey::Up => (line.checked_sub(1)?, column),
            NavKey::Down => (line + 1, column),
            NavKey::Left => (line, column.checked_sub(1)?),
            NavKey::Right => (line, column + 1),
            NavKey::Commit | NavKey::Delete => return None,
        };
        grid.cell_at(line, column)
    }

    /// Keep focus valid after the grid changed.
    ///
    /// `previous` is the grid the current focus was taken from. A focus that
    /// no longer exists stays on its line if the line survived, else moves to
    /// the nearest surviving line above it (or the first line). The column is
    /// kept when it still exists, otherwise the name column is used.
    pub(crate) fn reconcile(&mut self, previous: &CellGrid, grid: &CellGrid) {
        if grid.is_empty() {
            self.focus = None;
            return;
        }
        let Some(focus) = self.focus.clone() else {
            self.focus = grid.first();
            return;
        };
        if grid.contains(&focus) {
            return;
        }

        let column = grid.column_index(&focus.column).unwrap_or(0);
        let old_line = previous.position(&focus).map(|(l, _)| l);
        let line = grid
            .lines()
            .iter()
            .position(|l| l.row == focus.row && l.sub_row == focus.sub_row)
            .or_else(|| {
                let l = old_line?;
                previous.lines()[..l]
                    .iter()
                    .rev()
                    .find_map(|candidate| grid.lines().iter().position(|x| x == candidate))
            })
            .unwrap_or(0);
        self.focus = grid.cell_at(line, column).or_else(|| grid.first());
    }
}

#[cfg(test)]
mod tests;
