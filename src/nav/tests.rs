#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::generate_months;

const JAN: &str = "January 2024";
const FEB: &str = "February 2024";
const MAR: &str = "March 2024";

fn period() -> Period {
    generate_months("2024-01".parse().unwrap(), "2024-03".parse().unwrap())
}

/// Seeded table where "General Income" has two sub-rows and a user expense row
/// was added after "Operational Expenses".
///
/// Visual order:
///   0 General Income
///   1   sub a
///   2   sub b
///   3 Other Income
///   4 Operational Expenses
///   5 New Category (expenses)
fn fixture() -> (BudgetTable, Period) {
    let p = period();
    let table = BudgetTable::seeded(&p).add_category_row(Category::Expenses, &p);
    let gi = table.rows()[0].id;
    let table = table.commit_new_sub_row(gi, &p).commit_new_sub_row(gi, &p);
    (table, p)
}

fn cell(row: RowId, sub_row: Option<SubRowId>, column: Column) -> CellRef {
    CellRef {
        row,
        sub_row,
        column,
    }
}

fn month(m: &str) -> Column {
    Column::Month(m.to_string())
}

fn focused(grid: &CellGrid, at: CellRef) -> Navigator {
    let mut nav = Navigator::default();
    assert!(nav.focus_on(grid, at));
    nav
}

// ── Registry ──────────────────────────────────────────────────

#[test]
fn test_grid_render_order() {
    let (table, p) = fixture();
    let grid = CellGrid::build(&table, &p);
    let rows = table.rows();
    let subs: Vec<SubRowId> = rows[0].sub_rows.iter().map(|s| s.id).collect();
    let expected = vec![
        GridLine { row: rows[0].id, sub_row: None },
        GridLine { row: rows[0].id, sub_row: Some(subs[0]) },
        GridLine { row: rows[0].id, sub_row: Some(subs[1]) },
        GridLine { row: rows[1].id, sub_row: None },
        GridLine { row: rows[2].id, sub_row: None },
        GridLine { row: rows[3].id, sub_row: None },
    ];
    assert_eq!(grid.lines(), expected.as_slice());
}

#[test]
fn test_income_rows_precede_expenses_regardless_of_insertion() {
    let p = period();
    let table = BudgetTable::seeded(&p).add_category_row(Category::Income, &p);
    let grid = CellGrid::build(&table, &p);
    let new_id = table.rows()[3].id;
    // the new income row renders right after "Other Income"
    assert_eq!(grid.lines()[2].row, new_id);
}

#[test]
fn test_grid_lookup() {
    let (table, p) = fixture();
    let grid = CellGrid::build(&table, &p);
    let oe = table.rows()[2].id;
    assert_eq!(grid.position(&cell(oe, None, Column::Name)), Some((4, 0)));
    assert_eq!(grid.position(&cell(oe, None, month(MAR))), Some((4, 3)));
    assert_eq!(grid.position(&cell(oe, None, month("April 2024"))), None);
    assert_eq!(grid.position(&cell(oe, Some(SubRowId(999)), Column::Name)), None);
}

// ── Vertical movement ─────────────────────────────────────────

#[test]
fn test_down_walks_sub_rows_then_next_row() {
    let (table, p) = fixture();
    let grid = CellGrid::build(&table, &p);
    let rows = table.rows();
    let subs: Vec<SubRowId> = rows[0].sub_rows.iter().map(|s| s.id).collect();
    let mut nav = focused(&grid, cell(rows[0].id, None, month(FEB)));

    let walk: Vec<NavEffect> = (0..4).map(|_| nav.handle(&grid, NavKey::Down)).collect();
    assert_eq!(
        walk,
        vec![
            NavEffect::Moved(cell(rows[0].id, Some(subs[0]), month(FEB))),
            NavEffect::Moved(cell(rows[0].id, Some(subs[1]), month(FEB))),
            NavEffect::Moved(cell(rows[1].id, None, month(FEB))),
            NavEffect::Moved(cell(rows[2].id, None, month(FEB))),
        ]
    );
}

#[test]
fn test_up_walks_back_to_parent() {
    let (table, p) = fixture();
    let grid = CellGrid::build(&table, &p);
    let rows = table.rows();
    let subs: Vec<SubRowId> = rows[0].sub_rows.iter().map(|s| s.id).collect();
    let mut nav = focused(&grid, cell(rows[0].id, Some(subs[1]), Column::Name));

    nav.handle(&grid, NavKey::Up);
    assert_eq!(nav.focus(), Some(&cell(rows[0].id, Some(subs[0]), Column::Name)));
    nav.handle(&grid, NavKey::Up);
    assert_eq!(nav.focus(), Some(&cell(rows[0].id, None, Column::Name)));
}

#[test]
fn test_no_move_past_edges() {
    let (table, p) = fixture();
    let grid = CellGrid::build(&table, &p);
    let rows = table.rows();

    let first = cell(rows[0].id, None, month(JAN));
    let mut nav = focused(&grid, first.clone());
    assert_eq!(nav.handle(&grid, NavKey::Up), NavEffect::None);
    assert_eq!(nav.focus(), Some(&first));

    let last = cell(rows[3].id, None, month(JAN));
    let mut nav = focused(&grid, last.clone());
    assert_eq!(nav.handle(&grid, NavKey::Down), NavEffect::None);
    assert_eq!(nav.focus(), Some(&last));
}

// ── Horizontal movement ───────────────────────────────────────

#[test]
fn test_left_right_through_name_column() {
    let (table, p) = fixture();
    let grid = CellGrid::build(&table, &p);
    let id = table.rows()[1].id;
    let mut nav = focused(&grid, cell(id, None, Column::Name));

    assert_eq!(nav.handle(&grid, NavKey::Left), NavEffect::None);
    nav.handle(&grid, NavKey::Right);
    assert_eq!(nav.focus(), Some(&cell(id, None, month(JAN))));
    nav.handle(&grid, NavKey::Right);
    nav.handle(&grid, NavKey::Right);
    assert_eq!(nav.focus(), Some(&cell(id, None, month(MAR))));
    assert_eq!(nav.handle(&grid, NavKey::Right), NavEffect::None);
    assert_eq!(nav.focus(), Some(&cell(id, None, month(MAR))));
    nav.handle(&grid, NavKey::Left);
    assert_eq!(nav.focus(), Some(&cell(id, None, month(FEB))));
}

// ── Commit / delete ───────────────────────────────────────────

#[test]
fn test_commit_and_delete_report_target_without_moving() {
    let (table, p) = fixture();
    let grid = CellGrid::build(&table, &p);
    let gi = table.rows()[0].id;
    let sub = table.rows()[0].sub_rows[0].id;
    let at = cell(gi, Some(sub), month(FEB));
    let mut nav = focused(&grid, at.clone());

    assert_eq!(nav.handle(&grid, NavKey::Commit), NavEffect::Commit(gi));
    assert_eq!(
        nav.handle(&grid, NavKey::Delete),
        NavEffect::Delete {
            row: gi,
            sub_row: Some(sub)
        }
    );
    assert_eq!(nav.focus(), Some(&at));
}

#[test]
fn test_unfocused_navigator_ignores_keys() {
    let (table, p) = fixture();
    let grid = CellGrid::build(&table, &p);
    let mut nav = Navigator::default();
    assert_eq!(nav.handle(&grid, NavKey::Down), NavEffect::None);
    assert_eq!(nav.handle(&grid, NavKey::Commit), NavEffect::None);
    assert!(nav.focus().is_none());
}

#[test]
fn test_movement_does_not_touch_table() {
    let (table, p) = fixture();
    let before = table.clone();
    let grid = CellGrid::build(&table, &p);
    let mut nav = focused(&grid, cell(table.rows()[0].id, None, Column::Name));
    for key in [NavKey::Down, NavKey::Right, NavKey::Down, NavKey::Left, NavKey::Up] {
        nav.handle(&grid, key);
    }
    assert_eq!(table, before);
}

// ── Reconcile ─────────────────────────────────────────────────

#[test]
fn test_reconcile_after_sub_row_delete() {
    let (table, p) = fixture();
    let old_grid = CellGrid::build(&table, &p);
    let gi = table.rows()[0].id;
    let subs: Vec<SubRowId> = table.rows()[0].sub_rows.iter().map(|s| s.id).collect();
    let mut nav = focused(&old_grid, cell(gi, Some(subs[1]), month(MAR)));

    let table = table.delete_sub_row(gi, subs[1]);
    let grid = CellGrid::build(&table, &p);
    nav.reconcile(&old_grid, &grid);
    assert_eq!(nav.focus(), Some(&cell(gi, Some(subs[0]), month(MAR))));
}

#[test]
fn test_reconcile_after_first_row_delete() {
    let (table, p) = fixture();
    let old_grid = CellGrid::build(&table, &p);
    let gi = table.rows()[0].id;
    let oi = table.rows()[1].id;
    let mut nav = focused(&old_grid, cell(gi, None, month(JAN)));

    let table = table.delete_row(gi);
    let grid = CellGrid::build(&table, &p);
    nav.reconcile(&old_grid, &grid);
    assert_eq!(nav.focus(), Some(&cell(oi, None, month(JAN))));
}

#[test]
fn test_reconcile_after_period_change_keeps_line() {
    let (table, p) = fixture();
    let old_grid = CellGrid::build(&table, &p);
    let oe = table.rows()[2].id;
    let mut nav = focused(&old_grid, cell(oe, None, month(MAR)));

    let shorter = generate_months("2024-01".parse().unwrap(), "2024-02".parse().unwrap());
    let table = table.with_period(&shorter);
    let grid = CellGrid::build(&table, &shorter);
    nav.reconcile(&old_grid, &grid);
    assert_eq!(nav.focus(), Some(&cell(oe, None, Column::Name)));
}

#[test]
fn test_reconcile_initial_and_empty() {
    let (table, p) = fixture();
    let grid = CellGrid::build(&table, &p);
    let mut nav = Navigator::default();
    nav.reconcile(&CellGrid::default(), &grid);
    assert_eq!(nav.focus(), Some(&cell(table.rows()[0].id, None, Column::Name)));

    let mut empty = BudgetTable::seeded(&p);
    let ids: Vec<RowId> = empty.rows().iter().map(|r| r.id).collect();
    for id in ids {
        empty = empty.delete_row(id);
    }
    nav.reconcile(&grid, &CellGrid::build(&empty, &p));
    assert!(nav.focus().is_none());
}
