use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode};
use super::commands;
use super::grid_view;
use super::theme;
use super::util::format_amount;
use crate::context_menu::{ContextMenu, APPLY_TO_ALL, MENU_HEIGHT, MENU_WIDTH};

/// Screen regions: title, table, status bar, command bar.
pub(crate) fn layout(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [title, table, status, command] = layout(f.area());

    render_title_bar(f, title, app);
    grid_view::render(f, table, app);
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if let ContextMenu::Visible { x, y, .. } = &app.menu {
        render_context_menu(f, f.area(), *x, *y);
    }
    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App) {
    let closing = format_amount(app.summary().final_balance());
    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            " BudgetGrid ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {} .. {} ", app.start, app.end),
            Style::default().fg(theme::TEXT_DIM),
        ),
        Span::styled("| closing ", Style::default().fg(theme::TEXT_DIM)),
        Span::styled(closing, theme::normal_style()),
    ]))
    .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(bar, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Editing => theme::GREEN,
        InputMode::Command => theme::YELLOW,
        InputMode::Menu => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} rows | {} months",
        app.table.rows().len(),
        app.period.len()
    );

    let right = match app.input_mode {
        InputMode::Normal => " i edit | Enter add item | Del delete | m menu | ? help ",
        InputMode::Editing => " type to edit | Enter add item | Esc done ",
        InputMode::Command => " Enter run | Esc cancel ",
        InputMode::Menu => " Enter apply to all | Esc close ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Editing => {
            let text = app.focused_text();
            let offset = 6 + text.chars().count() as u16;
            (
                Line::from(vec![
                    Span::styled("edit> ", Style::default().fg(theme::GREEN)),
                    Span::styled(text, theme::command_bar_style()),
                ]),
                Some(offset),
            )
        }
        InputMode::Normal | InputMode::Menu => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Screen rectangle of a menu opened at `(x, y)`, clamped to `area`.
pub(crate) fn menu_area(area: Rect, x: u16, y: u16) -> Rect {
    let width = MENU_WIDTH.min(area.width);
    let height = MENU_HEIGHT.min(area.height);
    let x = x.min(area.right().saturating_sub(width));
    let y = y.min(area.bottom().saturating_sub(height));
    Rect::new(x, y, width, height)
}

fn render_context_menu(f: &mut Frame, area: Rect, x: u16, y: u16) {
    let popup = menu_area(area, x, y);
    f.render_widget(Clear, popup);
    let menu = Paragraph::new(Line::from(Span::styled(
        format!(" {APPLY_TO_ALL}"),
        theme::menu_style().add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(theme::menu_style()),
    );
    f.render_widget(menu, popup);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let heading = Style::default()
        .fg(theme::YELLOW)
        .add_modifier(Modifier::BOLD);
    let mut help_text = vec![
        Line::from(Span::styled(
            " BudgetGrid Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", heading)),
        Line::from(Span::styled(
            "  Arrows or h/j/k/l  Move between cells (no wrap at the edges)",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Ctrl-q / Ctrl-c    Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Editing", heading)),
        Line::from(Span::styled(
            "  i / e / F2         Edit focused cell (Esc to finish)",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Enter              Add a line item under the focused row",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Del / D            Delete focused row or line item",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  I / E              Add income / expense category",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  m / right click    Apply-to-all menu on a month cell",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Commands", heading)),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
