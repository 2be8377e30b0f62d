use crate::models::{BudgetTable, RowId, SubRowId};

/// Width and height of the floating menu, border included.
pub(crate) const MENU_WIDTH: u16 = 16;
pub(crate) const MENU_HEIGHT: u16 = 3;

pub(crate) const APPLY_TO_ALL: &str = "Apply to All";

/// The month cell a menu was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MenuTarget {
    pub(crate) row: RowId,
    pub(crate) sub_row: Option<SubRowId>,
    pub(crate) month: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum ContextMenu {
    #[default]
    Hidden,
    Visible {
        x: u16,
        y: u16,
        target: MenuTarget,
    },
}

impl ContextMenu {
    pub(crate) fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    pub(crate) fn target(&self) -> Option<&MenuTarget> {
        match self {
            Self::Hidden => None,
            Self::Visible { target, .. } => Some(target),
        }
    }

    /// Show the menu at screen position `(x, y)`. An already visible menu
    /// moves to the new cell.
    pub(crate) fn open(&mut self, target: MenuTarget, x: u16, y: u16) {
        tracing::debug!(row = target.row.0, month = %target.month, x, y, "context menu opened");
        *self = Self::Visible { x, y, target };
    }

    /// A primary click landed outside the menu.
    pub(crate) fn dismiss(&mut self) {
        *self = Self::Hidden;
    }

    /// Whether the screen position `(x, y)` falls on the menu.
    pub(crate) fn contains(&self, px: u16, py: u16) -> bool {
        match self {
            Self::Hidden => false,
            Self::Visible { x, y, .. } => {
                (*x..x.saturating_add(MENU_WIDTH)).contains(&px)
                    && (*y..y.saturating_add(MENU_HEIGHT)).contains(&py)
            }
        }
    }

    /// Copy the target cell's value into every month of its row (or sub-row)
    /// and hide the menu. Does nothing while hidden.
    #[must_use]
    pub(crate) fn apply_to_all(&mut self, table: BudgetTable) -> BudgetTable {
        let Self::Visible { target, .. } = std::mem::take(self) else {
            return table;
        };
        let text = table
            .cell_text(target.row, target.sub_row, &target.month)
            .to_string();
        tracing::debug!(row = target.row.0, %text, "apply to all");
        table.fill_row(target.row, target.sub_row, &text)
    }
}

#[cfg(test)]
#[path = "context_menu_tests.rs"]
mod tests;
