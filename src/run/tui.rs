use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::models::Category;
use crate::nav::NavKey;
use crate::ui::app::{App, InputMode};
use crate::ui::{commands, grid_view, render};

pub(crate) fn as_tui(config: &Config) -> Result<()> {
    let mut app = App::new(config);
    tracing::info!(start = %config.start, end = %config.end, "starting tui");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            app.frame_area = f.area();
            let table = render::layout(f.area())[1];
            // Two borders and the month header
            app.visible_lines = (table.height.saturating_sub(3) as usize).max(1);
            app.visible_months = grid_view::months_that_fit(table.width);
            app.ensure_focus_visible();
            render::render(f, app);
        })?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.show_help {
                    app.show_help = false;
                    continue;
                }
                match app.input_mode {
                    InputMode::Normal => handle_normal_input(key, app),
                    InputMode::Editing => handle_editing_input(key, app),
                    InputMode::Command => handle_command_input(key, app),
                    InputMode::Menu => handle_menu_input(key, app),
                }
            }
            Event::Mouse(mouse) => handle_mouse(mouse, app),
            _ => {}
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Up | KeyCode::Char('k') => app.navigate(NavKey::Up),
        KeyCode::Down | KeyCode::Char('j') => app.navigate(NavKey::Down),
        KeyCode::Left | KeyCode::Char('h') => app.navigate(NavKey::Left),
        KeyCode::Right | KeyCode::Char('l') => app.navigate(NavKey::Right),
        KeyCode::Enter => app.navigate(NavKey::Commit),
        KeyCode::Delete | KeyCode::Char('D') => app.navigate(NavKey::Delete),
        KeyCode::Char('i') | KeyCode::Char('e') | KeyCode::F(2) => app.begin_editing(),
        KeyCode::Char('I') => app.add_category(Category::Income),
        KeyCode::Char('E') => app.add_category(Category::Expenses),
        KeyCode::Char('m') => open_menu_at_focus(app),
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_focused(|text| text.push(c));
        }
        KeyCode::Backspace => {
            app.edit_focused(|text| {
                text.pop();
            });
        }
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            app.input_mode = InputMode::Normal;
            let nav = match key.code {
                KeyCode::Up => NavKey::Up,
                KeyCode::Down => NavKey::Down,
                KeyCode::Left => NavKey::Left,
                _ => NavKey::Right,
            };
            app.navigate(nav);
        }
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.navigate(NavKey::Commit);
        }
        KeyCode::Delete => {
            app.input_mode = InputMode::Normal;
            app.navigate(NavKey::Delete);
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            if let Err(e) = commands::handle_command(&input, app) {
                tracing::debug!(command = %input, error = %e, "command failed");
                app.set_status(format!("Error: {e}"));
            }
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_menu_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('a') => app.apply_menu(),
        _ => app.close_menu(),
    }
}

fn handle_mouse(mouse: MouseEvent, app: &mut App) {
    let table_area = render::layout(app.frame_area)[1];
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Right) => {
            if app.input_mode == InputMode::Editing {
                app.input_mode = InputMode::Normal;
            }
            let Some(cell) = grid_view::hit_test(app, table_area, mouse.column, mouse.row) else {
                app.close_menu();
                return;
            };
            app.nav.focus_on(&app.grid, cell.clone());
            let popup = render::menu_area(app.frame_area, mouse.column, mouse.row);
            if !app.open_menu(&cell, popup.x, popup.y) {
                app.close_menu();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if app.menu.is_visible() {
                if app.menu.contains(mouse.column, mouse.row) {
                    app.apply_menu();
                    return;
                }
                app.close_menu();
            }
            if let Some(cell) = grid_view::hit_test(app, table_area, mouse.column, mouse.row) {
                if app.input_mode == InputMode::Editing {
                    app.input_mode = InputMode::Normal;
                }
                app.nav.focus_on(&app.grid, cell);
            }
        }
        _ => {}
    }
}

// ── Helpers ──────────────────────────────────────────────────

fn open_menu_at_focus(app: &mut App) {
    let Some(cell) = app.focused().cloned() else {
        return;
    };
    let table_area = render::layout(app.frame_area)[1];
    let (x, y) = grid_view::cell_origin(app, table_area, &cell)
        .unwrap_or((table_area.x, table_area.y));
    let popup = render::menu_area(app.frame_area, x, y.saturating_add(1));
    if !app.open_menu(&cell, popup.x, popup.y) {
        app.set_status("Apply to All works on month cells");
    }
}
