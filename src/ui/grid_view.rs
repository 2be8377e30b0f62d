use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::aggregate::{sub_total, Summary};
use crate::models::{BudgetTable, Category, RowId};
use crate::nav::{CellRef, Column};
use crate::ui::app::{App, InputMode};
use crate::ui::theme;
use crate::ui::util::{align_left, align_right, format_amount};

pub(crate) const NAME_WIDTH: u16 = 24;
pub(crate) const MONTH_WIDTH: u16 = 16;

/// One rendered line of the table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DisplayLine {
    Section(Category),
    /// Index into the cell grid's lines.
    Cells(usize),
    SubTotal(RowId),
    Spacer,
    CategoryTotal(Category),
    Profit,
    Opening,
    Closing,
}

/// Body lines in render order. `Cells` indices follow the same walk as
/// `CellGrid::build`.
pub(crate) fn display_lines(table: &BudgetTable) -> Vec<DisplayLine> {
    let mut lines = Vec::new();
    let mut grid_line = 0;
    for category in Category::all() {
        lines.push(DisplayLine::Section(*category));
        for row in table.rows_in(*category) {
            for _ in 0..=row.sub_rows.len() {
                lines.push(DisplayLine::Cells(grid_line));
                grid_line += 1;
            }
            lines.push(DisplayLine::SubTotal(row.id));
            lines.push(DisplayLine::Spacer);
        }
        lines.push(DisplayLine::CategoryTotal(*category));
        if *category == Category::Income {
            lines.push(DisplayLine::Spacer);
        }
    }
    lines.extend([DisplayLine::Profit, DisplayLine::Opening, DisplayLine::Closing]);
    lines
}

/// Body line index of a cell-grid line.
pub(crate) fn display_index(table: &BudgetTable, grid_line: usize) -> usize {
    display_lines(table)
        .iter()
        .position(|l| *l == DisplayLine::Cells(grid_line))
        .unwrap_or(0)
}

/// How many month columns fit beside the name column in a bordered block.
pub(crate) fn months_that_fit(width: u16) -> usize {
    (width.saturating_sub(2 + NAME_WIDTH) / MONTH_WIDTH).max(1) as usize
}

/// The editable cell under screen position `(x, y)`, if any.
pub(crate) fn hit_test(app: &App, area: Rect, x: u16, y: u16) -> Option<CellRef> {
    let inner = Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );
    if x < inner.x || y <= inner.y || x >= inner.right() || y >= inner.bottom() {
        return None;
    }
    let body_row = (y - inner.y - 1) as usize + app.line_scroll;
    let DisplayLine::Cells(line) = *display_lines(&app.table).get(body_row)? else {
        return None;
    };
    let rel_x = x - inner.x;
    let column = if rel_x < NAME_WIDTH {
        0
    } else {
        let offset = ((rel_x - NAME_WIDTH) / MONTH_WIDTH) as usize;
        if offset >= app.visible_months {
            return None;
        }
        1 + app.month_scroll + offset
    };
    app.grid.cell_at(line, column)
}

/// Top-left screen position of `cell`, or `None` when it is scrolled out of view.
pub(crate) fn cell_origin(app: &App, area: Rect, cell: &CellRef) -> Option<(u16, u16)> {
    let (line, column) = app.grid.position(cell)?;
    let body_row = display_index(&app.table, line).checked_sub(app.line_scroll)?;
    if body_row >= app.visible_lines {
        return None;
    }
    let x = if column == 0 {
        area.x + 1
    } else {
        let offset = (column - 1).checked_sub(app.month_scroll)?;
        if offset >= app.visible_months {
            return None;
        }
        area.x + 1 + NAME_WIDTH + offset as u16 * MONTH_WIDTH
    };
    let y = area.y + 2 + body_row as u16;
    Some((x, y))
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let months: Vec<&str> = app
        .period
        .iter()
        .skip(app.month_scroll)
        .take(app.visible_months)
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Budget {} to {} ({} months) ", app.start, app.end, app.period.len()),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.period.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No months in range", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Use :range <YYYY-MM> <YYYY-MM> to pick a period",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let summary = app.summary();
    let mut lines = vec![header_line(&months)];
    lines.extend(
        display_lines(&app.table)
            .into_iter()
            .skip(app.line_scroll)
            .take(area.height.saturating_sub(3) as usize)
            .map(|dl| body_line(app, &summary, &months, dl)),
    );

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn header_line<'a>(months: &[&str]) -> Line<'a> {
    let mut spans = vec![Span::styled(
        align_left("", NAME_WIDTH as usize),
        theme::header_style(),
    )];
    spans.extend(months.iter().map(|m| {
        Span::styled(align_right(m, MONTH_WIDTH as usize), theme::header_style())
    }));
    Line::from(spans)
}

fn body_line<'a>(app: &App, summary: &Summary, months: &[&str], line: DisplayLine) -> Line<'a> {
    match line {
        DisplayLine::Section(category) => Line::from(Span::styled(
            category.title().to_string(),
            theme::section_style(),
        )),
        DisplayLine::Spacer => Line::from(""),
        DisplayLine::Cells(index) => cells_line(app, months, index),
        DisplayLine::SubTotal(row) => {
            let name = app.table.row(row).map(|r| r.name.as_str()).unwrap_or("");
            totals_line("Sub Totals", months, |m| sub_total(app.table.rows(), name, m))
        }
        DisplayLine::CategoryTotal(Category::Income) => {
            totals_line("Income Totals", months, |m| summary.get(m).income)
        }
        DisplayLine::CategoryTotal(Category::Expenses) => {
            totals_line("Totals Expenses", months, |m| summary.get(m).expenses)
        }
        DisplayLine::Profit => totals_line("Profit/Loss", months, |m| summary.get(m).profit),
        DisplayLine::Opening => totals_line("Opening Balance", months, |m| summary.get(m).opening),
        DisplayLine::Closing => totals_line("Closing Balance", months, |m| summary.get(m).closing),
    }
}

fn totals_line<'a>(label: &str, months: &[&str], value: impl Fn(&str) -> Decimal) -> Line<'a> {
    let mut spans = vec![Span::styled(
        align_left(label, NAME_WIDTH as usize),
        theme::total_label_style(),
    )];
    spans.extend(months.iter().map(|m| {
        let amount = value(m);
        Span::styled(
            align_right(&format_amount(amount), MONTH_WIDTH as usize),
            theme::amount_style(amount),
        )
    }));
    Line::from(spans)
}

fn cells_line<'a>(app: &App, months: &[&str], index: usize) -> Line<'a> {
    let Some(grid_line) = app.grid.lines().get(index).copied() else {
        return Line::from("");
    };
    let Some(row) = app.table.row(grid_line.row) else {
        return Line::from("");
    };
    let sub = grid_line.sub_row.and_then(|sid| row.sub_row(sid));
    let base = if sub.is_some() {
        theme::sub_row_style()
    } else {
        theme::normal_style()
    };

    let focus = app.focused();
    let style_for = |column: &Column, default: Style| -> Style {
        let is_focus = focus.is_some_and(|c| {
            c.row == grid_line.row && c.sub_row == grid_line.sub_row && &c.column == column
        });
        match (is_focus, app.input_mode) {
            (true, InputMode::Editing) => theme::editing_style(),
            (true, _) => theme::focused_style(),
            (false, _) => default,
        }
    };

    let name = match sub {
        Some(s) => format!("  {}", s.name),
        None => row.name.clone(),
    };
    let name_default = if row.protected && sub.is_none() {
        theme::locked_style()
    } else {
        base
    };
    let mut spans = vec![Span::styled(
        align_left(&name, NAME_WIDTH as usize),
        style_for(&Column::Name, name_default),
    )];
    for m in months {
        let text = match sub {
            Some(s) => s.value(m),
            None => row.value(m),
        };
        let column = Column::Month(m.to_string());
        spans.push(Span::styled(
            align_right(text, MONTH_WIDTH as usize),
            style_for(&column, base),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
#[path = "grid_view_tests.rs"]
mod tests;
