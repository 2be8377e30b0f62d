use ratatui::style::{Color, Modifier, Style};
use rust_decimal::Decimal;

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const HEADER_FG: Color = Color::Rgb(205, 214, 244);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn section_style() -> Style {
    Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
}

pub(crate) fn focused_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

/// Focused cell while its text is being typed into.
pub(crate) fn editing_style() -> Style {
    Style::default()
        .fg(HEADER_BG)
        .bg(GREEN)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn sub_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn locked_style() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn total_label_style() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD)
}

/// Green for surpluses, red for deficits.
pub(crate) fn amount_style(amount: Decimal) -> Style {
    if amount < Decimal::ZERO {
        Style::default().fg(RED)
    } else if amount > Decimal::ZERO {
        Style::default().fg(GREEN)
    } else {
        dim_style()
    }
}

pub(crate) fn menu_style() -> Style {
    Style::default().fg(TEXT).bg(HEADER_BG)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}
