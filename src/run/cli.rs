use anyhow::{Context, Result};

use crate::aggregate::Summary;
use crate::config::{Config, DEFAULT_END, DEFAULT_START};
use crate::models::{generate_months, validate_range, BudgetTable, Period, YearMonth};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], config: &Config) -> Result<()> {
    match args[0].as_str() {
        "months" | "m" => cli_months(&args[1..], config),
        "summary" | "s" => cli_summary(&args[1..], config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetgrid {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("BudgetGrid: monthly income and expense planner");
    println!();
    println!("Usage: budgetgrid [options] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  months [start] [end]          Print the month labels of a range");
    println!("  summary [start] [end]         Print the month-by-month totals layout of a new");
    println!("                                budget (every amount starts at 0)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --start <YYYY-MM>             First month, default {DEFAULT_START} (env BUDGETGRID_START)");
    println!("  --end <YYYY-MM>               Last month, default {DEFAULT_END} (env BUDGETGRID_END)");
    println!("  --log <path|default>          Write logs to a file (env BUDGETGRID_LOG)");
}

/// Positional `[start] [end]`, falling back to the configured range.
fn range_args(args: &[String], config: &Config) -> Result<(YearMonth, YearMonth)> {
    let start = match args.first() {
        Some(s) => s.parse().with_context(|| format!("Invalid start month: {s}"))?,
        None => config.start,
    };
    let end = match args.get(1) {
        Some(s) => s.parse().with_context(|| format!("Invalid end month: {s}"))?,
        None => config.end,
    };
    if args.len() > 2 {
        anyhow::bail!("Expected at most two months, got {}", args.len());
    }
    validate_range(start, end)?;
    Ok((start, end))
}

fn cli_months(args: &[String], config: &Config) -> Result<()> {
    let (start, end) = range_args(args, config)?;
    for label in generate_months(start, end).iter() {
        println!("{label}");
    }
    Ok(())
}

fn cli_summary(args: &[String], config: &Config) -> Result<()> {
    let (start, end) = range_args(args, config)?;
    let period = generate_months(start, end);
    // Nothing is stored between runs, so this is always the blank seeded budget.
    let table = BudgetTable::seeded(&period);
    for line in summary_lines(&table, &period) {
        println!("{line}");
    }
    Ok(())
}

/// Per-month totals table for `table`, one string per output line.
fn summary_lines(table: &BudgetTable, period: &Period) -> Vec<String> {
    let summary = Summary::compute(table.rows(), period);
    let rule = "─".repeat(76);

    let mut lines = vec![
        format!("BudgetGrid: {} months, new budget (all amounts start at 0)", period.len()),
        rule.clone(),
        format!(
            "{:<16} {:>11} {:>11} {:>11} {:>11} {:>11}",
            "Month", "Income", "Expenses", "Profit", "Opening", "Closing"
        ),
    ];
    for (month, totals) in summary.iter() {
        lines.push(format!(
            "{:<16} {:>11} {:>11} {:>11} {:>11} {:>11}",
            month,
            format_amount(totals.income),
            format_amount(totals.expenses),
            format_amount(totals.profit),
            format_amount(totals.opening),
            format_amount(totals.closing),
        ));
    }
    lines.push(rule);
    lines.push(format!("  Final balance: {}", format_amount(summary.final_balance())));
    lines
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
