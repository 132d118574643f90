use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use std::io::Write;
use std::path::PathBuf;

use crate::budget::{
    parse_amount, parse_category, BudgetError, BudgetState, INVALID_BUDGET, INVALID_EXPENSE,
};
use crate::config::{expand_home, Settings};
use crate::format::{format_amount, format_percent};
use crate::ui::util::progress_cells;

pub(crate) fn as_cli(args: &[String], settings: &Settings) -> Result<()> {
    match args[1].as_str() {
        "report" | "r" => cli_report(&args[2..]),
        "export" => cli_export(&args[2..], settings),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetpad {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("budgetpad - session-only budget and expense tracker");
    println!();
    println!("Usage: budgetpad [command]");
    println!();
    println!("Commands:");
    println!("  (none)                             Launch interactive TUI");
    println!("  report <budget> [expense ...]      Print totals, category breakdown and suggestions");
    println!("  export [path] <budget> [expense ...]");
    println!("                                     Write expenses and category totals to CSV");
    println!("  --help, -h                         Show this help");
    println!("  --version, -V                      Show version");
    println!();
    println!("Expenses are written as <category>:<amount>:<description>,");
    println!("e.g. budgetpad report 100 Food:30:groceries Transport:20:bus");
}

/// Build a one-off session from a budget and `category:amount:description`
/// expense specs. Stops at the first invalid entry.
pub(crate) fn build_session(budget: &str, expenses: &[String]) -> Result<BudgetState> {
    let mut state = BudgetState::new();
    let amount = parse_amount(budget)
        .ok_or_else(|| BudgetError::InvalidInput(INVALID_BUDGET.into()))
        .with_context(|| format!("Invalid budget '{budget}'"))?;
    state
        .set_total_budget(amount)
        .with_context(|| format!("Invalid budget '{budget}'"))?;

    for (i, spec) in expenses.iter().enumerate() {
        add_expense_spec(&mut state, spec)
            .with_context(|| format!("Invalid expense #{} '{spec}'", i + 1))?;
    }
    Ok(state)
}

fn add_expense_spec(state: &mut BudgetState, spec: &str) -> std::result::Result<(), BudgetError> {
    let mut parts = spec.splitn(3, ':');
    let (Some(category), Some(amount), Some(description)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(BudgetError::InvalidInput(INVALID_EXPENSE.into()));
    };
    let category = parse_category(category)?;
    let amount =
        parse_amount(amount).ok_or_else(|| BudgetError::InvalidInput(INVALID_EXPENSE.into()))?;
    state.add_expense(category, amount, description)?;
    Ok(())
}

fn cli_report(args: &[String]) -> Result<()> {
    let Some((budget, expenses)) = args.split_first() else {
        anyhow::bail!("Usage: budgetpad report <budget> [<category>:<amount>:<description> ...]");
    };
    let state = build_session(budget, expenses)?;
    write_report(&state, &mut std::io::stdout().lock())
}

fn cli_export(args: &[String], settings: &Settings) -> Result<()> {
    // Output path is optional; a first argument that isn't an amount is the path
    let (path, rest) = match args.first() {
        Some(first) if parse_amount(first).is_none() => {
            let home = std::env::var("HOME").ok();
            (PathBuf::from(expand_home(first, home.as_deref())), &args[1..])
        }
        _ => (settings.default_export_path(), args),
    };

    let Some((budget, expenses)) = rest.split_first() else {
        anyhow::bail!("Usage: budgetpad export [path] <budget> [<category>:<amount>:<description> ...]");
    };
    let state = build_session(budget, expenses)?;

    let files = crate::export::export_to_csv(&state, &path)?;
    println!("Exported {} expenses to {}", files.count, path.display());
    println!("Category totals written to {}", files.summary.display());
    println!("Budget overview written to {}", files.overview.display());
    Ok(())
}

pub(crate) fn write_report<W: Write>(state: &BudgetState, out: &mut W) -> Result<()> {
    let percent = state.utilization_percent();
    let filled = progress_cells(percent.to_f64().unwrap_or(0.0), 20);

    writeln!(out, "budgetpad report")?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Total Budget:    {}", format_amount(state.total_budget()))?;
    writeln!(out, "  Total Expenses:  {}", format_amount(state.total_spent()))?;
    writeln!(out, "  Remaining:       {}", format_amount(state.remaining()))?;
    writeln!(
        out,
        "  Utilization:     {} [{}{}]",
        format_percent(percent),
        "█".repeat(filled),
        "░".repeat(20 - filled)
    )?;

    if !state.expenses().is_empty() {
        writeln!(out)?;
        writeln!(out, "Expenses:")?;
        for e in state.expenses() {
            writeln!(
                out,
                "  {} - {}: {:<28} {}",
                e.date_label(),
                e.category,
                e.description,
                format_amount(e.amount)
            )?;
        }

        writeln!(out)?;
        writeln!(out, "Spending by Category:")?;
        for (category, amount) in state.category_breakdown() {
            writeln!(out, "  {:<24} {}", category.as_str(), format_amount(amount))?;
        }
    }

    let suggestion = state.suggestion();
    writeln!(out)?;
    writeln!(out, "{}", suggestion.headline())?;
    for line in suggestion.details() {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
