mod period;
mod row;
mod table;

pub(crate) use period::{generate_months, validate_range, Period, YearMonth};
pub(crate) use row::{Category, Row, RowId, SubRowId};
pub(crate) use table::{Action, BudgetTable, NEW_CATEGORY_NAME};
