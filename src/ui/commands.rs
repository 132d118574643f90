use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::budget::{parse_amount, parse_category, BudgetError, INVALID_BUDGET, INVALID_EXPENSE};
use crate::format::format_amount;
use crate::models::Category;

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

    register_command!("q", "Quit budgetpad", cmd_quit, r);
    register_command!("quit", "Quit budgetpad", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("b", "Set total budget (e.g. :b 500)", cmd_budget, r);
    register_command!("budget", "Set total budget (e.g. :budget 500)", cmd_budget, r);
    register_command!(
        "a",
        "Add expense (e.g. :a Food 12.50 lunch)",
        cmd_add,
        r
    );
    register_command!(
        "add",
        "Add expense (e.g. :add Food 12.50 lunch)",
        cmd_add,
        r
    );
    register_command!(
        "categories",
        "List expense categories",
        cmd_categories,
        r
    );
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/budget.csv)",
        cmd_export,
        r
    );
    register_command!("x", "Export expenses to CSV", cmd_export, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, "running command");
        (cmd.run)(args, app)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
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

fn cmd_dashboard(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App) -> anyhow::Result<()> {
    let result = parse_amount(args)
        .ok_or_else(|| BudgetError::InvalidInput(INVALID_BUDGET.into()))
        .and_then(|amount| app.budget.set_total_budget(amount).map(|()| amount));

    match result {
        Ok(amount) => app.set_status(format!("Total budget set to {}", format_amount(amount))),
        Err(e) => app.alert(&e),
    }
    Ok(())
}

/// `<category> <amount> <description>`; the description may contain spaces.
fn cmd_add(args: &str, app: &mut App) -> anyhow::Result<()> {
    let Some((category, amount, description)) = split_expense_args(args) else {
        app.alert(&BudgetError::InvalidInput(INVALID_EXPENSE.into()));
        return Ok(());
    };

    let result = parse_category(category).and_then(|category| {
        let amount = parse_amount(amount)
            .ok_or_else(|| BudgetError::InvalidInput(INVALID_EXPENSE.into()))?;
        app.budget
            .add_expense(category, amount, description)
            .map(|e| format!("Added {}: {} ({})", e.category, e.description, format_amount(e.amount)))
    });

    match result {
        Ok(msg) => {
            app.select_last_expense();
            app.set_status(msg);
        }
        Err(e) => app.alert(&e),
    }
    Ok(())
}

fn split_expense_args(args: &str) -> Option<(&str, &str, &str)> {
    let (category, rest) = args.trim().split_once(char::is_whitespace)?;
    let (amount, description) = rest.trim_start().split_once(char::is_whitespace)?;
    Some((category, amount, description.trim()))
}

fn cmd_categories(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
    app.set_status(format!("Categories: {}", names.join(", ")));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.budget.expenses().is_empty() {
        app.set_status("No expenses to export");
        return Ok(());
    }

    let path = if args.is_empty() {
        app.settings.default_export_path()
    } else {
        let home = std::env::var("HOME").ok();
        PathBuf::from(crate::config::expand_home(args, home.as_deref()))
    };

    let files = crate::export::export_to_csv(&app.budget, &path)?;
    app.set_status(format!(
        "Exported {} expenses to {} (categories: {}, overview: {})",
        files.count,
        path.display(),
        files.summary.display(),
        files.overview.display()
    ));
    Ok(())
}
