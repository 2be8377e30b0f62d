use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode};
use crate::models::{Category, YearMonth};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit BudgetGrid", cmd_quit, r);
    register_command!("quit", "Quit BudgetGrid", cmd_quit, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!(
        "range",
        "Set month range (e.g. :range 2024-01 2024-12)",
        cmd_range,
        r
    );
    register_command!("r", "Set month range (e.g. :r 2024-01 2024-06)", cmd_range, r);
    register_command!("start", "Set first month (e.g. :start 2024-03)", cmd_start, r);
    register_command!("end", "Set last month (e.g. :end 2024-09)", cmd_end, r);
    register_command!("add-income", "Add a new income category", cmd_add_income, r);
    register_command!("ai", "Add a new income category", cmd_add_income, r);
    register_command!("add-expense", "Add a new expense category", cmd_add_expense, r);
    register_command!("ae", "Add a new expense category", cmd_add_expense, r);
    register_command!(
        "rename",
        "Rename focused row (e.g. :rename Rent)",
        cmd_rename,
        r
    );
    register_command!(
        "set",
        "Set focused cell (e.g. :set 1200)",
        cmd_set,
        r
    );
    register_command!(
        "apply-all",
        "Copy focused value to every month of its row",
        cmd_apply_all,
        r
    );
    register_command!("delete", "Delete focused row or line item", cmd_delete, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        tracing::warn!(command = cmd_name, "unknown command");
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 2) // skip short aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_range(args: &str, app: &mut App) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        anyhow::bail!("Usage: :range <YYYY-MM> <YYYY-MM>");
    };
    let start: YearMonth = start.parse()?;
    let end: YearMonth = end.parse()?;
    app.set_range(start, end)?;
    app.set_status(format!("Range: {start} to {end} ({} months)", app.period.len()));
    Ok(())
}

fn cmd_start(args: &str, app: &mut App) -> anyhow::Result<()> {
    let start: YearMonth = args.parse()?;
    app.set_range(start, app.end)?;
    app.set_status(format!("Start month: {start}"));
    Ok(())
}

fn cmd_end(args: &str, app: &mut App) -> anyhow::Result<()> {
    let end: YearMonth = args.parse()?;
    app.set_range(app.start, end)?;
    app.set_status(format!("End month: {end}"));
    Ok(())
}

fn cmd_add_income(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.add_category(Category::Income);
    Ok(())
}

fn cmd_add_expense(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.add_category(Category::Expenses);
    Ok(())
}

fn cmd_rename(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(mut cell) = app.focused().cloned() else {
        anyhow::bail!("No cell focused");
    };
    cell.column = crate::nav::Column::Name;
    if !app.nav.focus_on(&app.grid, cell) {
        anyhow::bail!("No cell focused");
    }
    if app.focused_is_locked() {
        anyhow::bail!("Seed rows cannot be renamed");
    }
    app.write_focused(args.to_string());
    app.set_status(format!("Renamed to: {args}"));
    Ok(())
}

fn cmd_set(args: &str, app: &mut App) -> anyhow::Result<()> {
    match app.focused() {
        None => anyhow::bail!("No cell focused"),
        Some(cell) if cell.month().is_none() => {
            anyhow::bail!("Focus a month cell first, or use :rename")
        }
        Some(_) => {}
    }
    app.write_focused(args.to_string());
    Ok(())
}

fn cmd_apply_all(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some(cell) = app.focused().cloned() else {
        anyhow::bail!("No cell focused");
    };
    if !app.open_menu(&cell, 0, 0) {
        anyhow::bail!("Focus a month cell first");
    }
    app.apply_menu();
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.focused().is_none() {
        anyhow::bail!("No cell focused");
    }
    app.delete_focused();
    if app.input_mode == InputMode::Editing {
        app.input_mode = InputMode::Normal;
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
