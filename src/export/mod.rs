//! CSV export of a session's expenses.
//!
//! Three files are written: the expense log with a running total, a
//! per-category summary next to it (`<name>-categories.csv`), and a one-row
//! budget overview (`<name>-overview.csv`). Money columns are rounded to
//! cents the same way the UI displays them.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::budget::{utilization, BudgetState};
use crate::format::round_cents;

const EXPENSE_HEADERS: [&str; 5] = ["Date", "Category", "Description", "Amount", "Running Total"];
const SUMMARY_HEADERS: [&str; 3] = ["Category", "Total Spent", "Share"];
const OVERVIEW_HEADERS: [&str; 4] = [
    "Total Budget",
    "Last Updated",
    "Total Expenses",
    "Remaining Budget",
];

/// Paths written by [`export_to_csv`].
#[derive(Debug)]
pub(crate) struct ExportedFiles {
    pub count: usize,
    pub summary: PathBuf,
    pub overview: PathBuf,
}

/// Write the expense log, category summary and budget overview.
pub(crate) fn export_to_csv(state: &BudgetState, path: &Path) -> Result<ExportedFiles> {
    let count = write_file(path, |file| write_expenses(state, file))?;

    let summary = sibling_path(path, "categories");
    write_file(&summary, |file| write_category_summary(state, file))?;

    let overview = sibling_path(path, "overview");
    let now = Local::now().naive_local();
    write_file(&overview, |file| write_overview(state, now, file))?;

    tracing::debug!(count, path = %path.display(), "exported expenses");
    Ok(ExportedFiles {
        count,
        summary,
        overview,
    })
}

fn write_file<F>(path: &Path, write: F) -> Result<usize>
where
    F: FnOnce(std::fs::File) -> Result<usize>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write(file)
}

pub(crate) fn write_expenses<W: Write>(state: &BudgetState, out: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(EXPENSE_HEADERS)?;

    let running = state.running_totals();
    for (expense, total) in state.expenses().iter().zip(running) {
        wtr.write_record([
            expense.date_label(),
            expense.category.to_string(),
            expense.description.clone(),
            format!("{:.2}", round_cents(expense.amount)),
            format!("{:.2}", round_cents(total)),
        ])?;
    }
    wtr.flush().context("Failed to write expenses")?;
    Ok(state.expenses().len())
}

/// One row per category, largest first. Share is the category's percentage
/// of total spending, not of the budget.
pub(crate) fn write_category_summary<W: Write>(state: &BudgetState, out: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(SUMMARY_HEADERS)?;

    let spent = state.total_spent();
    let breakdown = state.category_breakdown();
    for (category, amount) in &breakdown {
        wtr.write_record([
            category.to_string(),
            format!("{:.2}", round_cents(*amount)),
            format!("{:.2}", round_cents(utilization(spent, *amount))),
        ])?;
    }
    wtr.flush().context("Failed to write category summary")?;
    Ok(breakdown.len())
}

/// Single row: the budget, when it was exported, and where it stands.
pub(crate) fn write_overview<W: Write>(
    state: &BudgetState,
    updated: NaiveDateTime,
    out: W,
) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(OVERVIEW_HEADERS)?;
    wtr.write_record([
        format!("{:.2}", round_cents(state.total_budget())),
        updated.format("%Y-%m-%d %H:%M:%S").to_string(),
        format!("{:.2}", round_cents(state.total_spent())),
        format!("{:.2}", round_cents(state.remaining())),
    ])?;
    wtr.flush().context("Failed to write budget overview")?;
    Ok(1)
}

/// `~/out.csv` + `categories` → `~/out-categories.csv`
pub(crate) fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("budgetpad-export");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}-{suffix}.{ext}"),
        None => format!("{stem}-{suffix}"),
    };
    path.with_file_name(name)
}
