use anyhow::Result;
use ratatui::layout::Rect;

use crate::aggregate::Summary;
use crate::config::Config;
use crate::context_menu::{ContextMenu, MenuTarget};
use crate::models::*;
use crate::nav::{CellGrid, CellRef, Column, NavEffect, NavKey, Navigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Editing,
    Command,
    Menu,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Editing => write!(f, "EDIT"),
            Self::Command => write!(f, "COMMAND"),
            Self::Menu => write!(f, "MENU"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Range
    pub(crate) start: YearMonth,
    pub(crate) end: YearMonth,
    pub(crate) period: Period,

    // Table
    pub(crate) table: BudgetTable,
    pub(crate) grid: CellGrid,
    pub(crate) nav: Navigator,
    pub(crate) menu: ContextMenu,

    // Viewport
    pub(crate) line_scroll: usize,
    pub(crate) month_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) frame_area: Rect,
    pub(crate) visible_lines: usize,
    pub(crate) visible_months: usize,
}

impl App {
    pub(crate) fn new(config: &Config) -> Self {
        let period = generate_months(config.start, config.end);
        let table = BudgetTable::seeded(&period);
        let grid = CellGrid::build(&table, &period);
        let mut nav = Navigator::default();
        nav.reconcile(&CellGrid::default(), &grid);

        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            start: config.start,
            end: config.end,
            period,

            table,
            grid,
            nav,
            menu: ContextMenu::default(),

            line_scroll: 0,
            month_scroll: 0,

            frame_area: Rect::default(),
            visible_lines: 20,
            visible_months: 6,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn summary(&self) -> Summary {
        Summary::compute(self.table.rows(), &self.period)
    }

    /// Run one table edit and keep grid, focus and menu consistent with it.
    pub(crate) fn dispatch(&mut self, action: Action) {
        let table = std::mem::take(&mut self.table);
        self.table = table.apply(&action, &self.period);
        self.rebuild_grid();
    }

    fn rebuild_grid(&mut self) {
        let previous = std::mem::replace(&mut self.grid, CellGrid::build(&self.table, &self.period));
        self.nav.reconcile(&previous, &self.grid);
        if let Some(target) = self.menu.target() {
            let still_there = self.grid.contains(&CellRef {
                row: target.row,
                sub_row: target.sub_row,
                column: Column::Month(target.month.clone()),
            });
            if !still_there {
                self.close_menu();
            }
        }
    }

    /// Switch to a new month range, keeping entered values for months that remain.
    pub(crate) fn set_range(&mut self, start: YearMonth, end: YearMonth) -> Result<()> {
        validate_range(start, end)?;
        self.start = start;
        self.end = end;
        self.period = generate_months(start, end);
        let table = std::mem::take(&mut self.table);
        self.table = table.with_period(&self.period);
        self.rebuild_grid();
        self.month_scroll = 0;
        self.ensure_focus_visible();
        tracing::info!(%start, %end, months = self.period.len(), "range changed");
        Ok(())
    }

    pub(crate) fn focused(&self) -> Option<&CellRef> {
        self.nav.focus()
    }

    /// Current text of the focused cell; the name for name cells.
    pub(crate) fn focused_text(&self) -> String {
        let Some(cell) = self.nav.focus() else {
            return String::new();
        };
        let Some(row) = self.table.row(cell.row) else {
            return String::new();
        };
        match (&cell.column, cell.sub_row) {
            (Column::Name, None) => row.name.clone(),
            (Column::Name, Some(sid)) => row.sub_row(sid).map(|s| s.name.clone()).unwrap_or_default(),
            (Column::Month(m), sub_row) => self.table.cell_text(cell.row, sub_row, m).to_string(),
        }
    }

    /// Whether the focused cell is the locked name of a seed row.
    pub(crate) fn focused_is_locked(&self) -> bool {
        self.nav.focus().is_some_and(|cell| {
            cell.column == Column::Name
                && cell.sub_row.is_none()
                && self.table.row(cell.row).is_some_and(|r| r.protected)
        })
    }

    /// Replace the focused cell's text with `text`.
    pub(crate) fn write_focused(&mut self, text: String) {
        let Some(cell) = self.nav.focus().cloned() else {
            return;
        };
        let action = match (cell.column, cell.sub_row) {
            (Column::Name, None) => Action::RenameRow {
                row: cell.row,
                name: text,
            },
            (Column::Name, Some(sub_row)) => Action::RenameSubRow {
                row: cell.row,
                sub_row,
                name: text,
            },
            (Column::Month(month), None) => Action::SetCell {
                row: cell.row,
                month,
                text,
            },
            (Column::Month(month), Some(sub_row)) => Action::SetSubCell {
                row: cell.row,
                sub_row,
                month,
                text,
            },
        };
        self.dispatch(action);
    }

    /// Apply `edit` to the focused cell's text.
    pub(crate) fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let mut text = self.focused_text();
        edit(&mut text);
        self.write_focused(text);
    }

    pub(crate) fn begin_editing(&mut self) {
        if self.nav.focus().is_none() {
            return;
        }
        if self.focused_is_locked() {
            self.set_status("Seed rows cannot be renamed");
            return;
        }
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn navigate(&mut self, key: NavKey) {
        match self.nav.handle(&self.grid, key) {
            NavEffect::None => {}
            NavEffect::Moved(_) => self.ensure_focus_visible(),
            NavEffect::Commit(row) => self.commit_sub_row(row),
            NavEffect::Delete { row, sub_row } => self.delete(row, sub_row),
        }
    }

    fn commit_sub_row(&mut self, row: RowId) {
        let before = self.table.row(row).map(|r| r.sub_rows.len());
        self.dispatch(Action::CommitNewSubRow { row });
        let after = self.table.row(row).map(|r| r.sub_rows.len());
        if after > before {
            self.set_status("Added line item");
        } else {
            self.set_status("Name the row before adding line items");
        }
    }

    fn delete(&mut self, row: RowId, sub_row: Option<SubRowId>) {
        let name = match sub_row {
            None => self.table.row(row).map(|r| r.name.clone()),
            Some(sid) => self
                .table
                .row(row)
                .and_then(|r| r.sub_row(sid))
                .map(|s| s.name.clone()),
        }
        .unwrap_or_default();
        let action = match sub_row {
            None => Action::DeleteRow { row },
            Some(sub_row) => Action::DeleteSubRow { row, sub_row },
        };
        self.dispatch(action);
        tracing::info!(row = row.0, sub_row = sub_row.map(|s| s.0), "deleted");
        self.ensure_focus_visible();
        self.set_status(if name.trim().is_empty() {
            "Deleted line".to_string()
        } else {
            format!("Deleted: {name}")
        });
    }

    pub(crate) fn delete_focused(&mut self) {
        self.navigate(NavKey::Delete);
    }

    /// Append a "New Category" row and focus its name.
    pub(crate) fn add_category(&mut self, category: Category) {
        self.dispatch(Action::AddCategoryRow { category });
        if let Some(row) = self.table.rows_in(category).last() {
            let cell = CellRef {
                row: row.id,
                sub_row: None,
                column: Column::Name,
            };
            self.nav.focus_on(&self.grid, cell);
        }
        self.ensure_focus_visible();
        tracing::info!(%category, "added category row");
        self.set_status(format!("Added {} category", category.as_str()));
    }

    /// Open the context menu on `cell` at screen position `(x, y)`.
    /// Name cells have no menu.
    pub(crate) fn open_menu(&mut self, cell: &CellRef, x: u16, y: u16) -> bool {
        let Some(month) = cell.month() else {
            return false;
        };
        self.menu.open(
            MenuTarget {
                row: cell.row,
                sub_row: cell.sub_row,
                month: month.to_string(),
            },
            x,
            y,
        );
        self.input_mode = InputMode::Menu;
        true
    }

    pub(crate) fn close_menu(&mut self) {
        self.menu.dismiss();
        if self.input_mode == InputMode::Menu {
            self.input_mode = InputMode::Normal;
        }
    }

    pub(crate) fn apply_menu(&mut self) {
        let table = std::mem::take(&mut self.table);
        self.table = self.menu.apply_to_all(table);
        self.rebuild_grid();
        if self.input_mode == InputMode::Menu {
            self.input_mode = InputMode::Normal;
        }
        self.set_status("Applied value to all months");
    }

    /// Scroll so the focused line and month are on screen.
    pub(crate) fn ensure_focus_visible(&mut self) {
        let Some(cell) = self.nav.focus() else {
            return;
        };
        if let Some((line, column)) = self.grid.position(cell) {
            let display = super::grid_view::display_index(&self.table, line);
            self.line_scroll = keep_visible(self.line_scroll, display, self.visible_lines);
            if column > 0 {
                self.month_scroll = keep_visible(self.month_scroll, column - 1, self.visible_months);
            }
        }
    }
}

/// Smallest change to `scroll` that keeps `index` inside a window of `page` items.
pub(crate) fn keep_visible(scroll: usize, index: usize, page: usize) -> usize {
    let page = page.max(1);
    if index < scroll {
        index
    } else if index >= scroll + page {
        index + 1 - page
    } else {
        scroll
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
