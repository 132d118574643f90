//! Session budget state: the total budget, the expenses logged against it,
//! and the figures derived from them.
//!
//! Every read is a `&self` query that recomputes from the expense list, so
//! the UI can call them after each mutation (or on every frame) without the
//! results drifting from the underlying records.

mod suggest;

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Category, Expense};

pub use suggest::Suggestion;

/// Errors raised by budget mutations. The state is left untouched whenever
/// one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    #[error("{0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, BudgetError>;

pub(crate) const INVALID_BUDGET: &str = "Please enter a valid budget amount";
pub(crate) const INVALID_EXPENSE: &str = "Please enter valid expense details";

#[derive(Debug, Clone, Default)]
pub struct BudgetState {
    total_budget: Decimal,
    expenses: Vec<Expense>,
}

impl BudgetState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_budget(&self) -> Decimal {
        self.total_budget
    }

    /// Expenses in the order they were added.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Replace the total budget. Previous value is discarded, not accumulated.
    pub fn set_total_budget(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            tracing::warn!(%amount, "rejected total budget");
            return Err(BudgetError::InvalidInput(INVALID_BUDGET.into()));
        }
        tracing::info!(previous = %self.total_budget, %amount, "total budget set");
        self.total_budget = amount;
        Ok(())
    }

    /// Record an expense dated today (local time).
    pub fn add_expense(
        &mut self,
        category: Category,
        amount: Decimal,
        description: &str,
    ) -> Result<&Expense> {
        self.add_expense_on(category, amount, description, Local::now().date_naive())
    }

    pub fn add_expense_on(
        &mut self,
        category: Category,
        amount: Decimal,
        description: &str,
        date: NaiveDate,
    ) -> Result<&Expense> {
        if amount <= Decimal::ZERO || description.is_empty() {
            tracing::warn!(%category, %amount, "rejected expense");
            return Err(BudgetError::InvalidInput(INVALID_EXPENSE.into()));
        }
        // Keep total_spent() from overflowing on later reads.
        if self.total_spent().checked_add(amount).is_none() {
            tracing::warn!(%category, %amount, "rejected expense: total overflow");
            return Err(BudgetError::InvalidInput(INVALID_EXPENSE.into()));
        }

        tracing::info!(%category, %amount, %date, "expense added");
        self.expenses.push(Expense::new(
            category,
            amount,
            description.to_string(),
            date,
        ));
        let idx = self.expenses.len() - 1;
        Ok(&self.expenses[idx])
    }

    pub fn total_spent(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// May be negative once spending passes the budget.
    pub fn remaining(&self) -> Decimal {
        self.total_budget - self.total_spent()
    }

    /// Percentage of the budget consumed. Zero when no budget is set.
    pub fn utilization_percent(&self) -> Decimal {
        utilization(self.total_budget, self.total_spent())
    }

    pub fn category_totals(&self) -> HashMap<Category, Decimal> {
        let mut totals: HashMap<Category, Decimal> = HashMap::new();
        for expense in &self.expenses {
            *totals.entry(expense.category).or_insert(Decimal::ZERO) += expense.amount;
        }
        totals
    }

    /// Category totals, largest first. Ties are ordered by category.
    pub fn category_breakdown(&self) -> Vec<(Category, Decimal)> {
        let mut breakdown: Vec<(Category, Decimal)> = self.category_totals().into_iter().collect();
        breakdown.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        breakdown
    }

    /// Cumulative spend after each expense, aligned with `expenses()`.
    pub fn running_totals(&self) -> Vec<Decimal> {
        self.expenses
            .iter()
            .scan(Decimal::ZERO, |acc, e| {
                *acc += e.amount;
                Some(*acc)
            })
            .collect()
    }

    pub fn suggestion(&self) -> Suggestion {
        Suggestion::evaluate(self.total_budget, self.total_spent())
    }
}

/// Parse a user-typed amount such as `12.50` or `$12.50`. `None` when the
/// text is not a number; the sign is left for the store to judge.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    Decimal::from_str(digits.trim()).ok()
}

pub fn parse_category(input: &str) -> Result<Category> {
    Category::parse(input).ok_or_else(|| {
        let names: Vec<&str> = Category::all().iter().map(|c| c.as_str()).collect();
        BudgetError::InvalidInput(format!(
            "Unknown category '{}'. Choose one of: {}",
            input.trim(),
            names.join(", ")
        ))
    })
}

pub(crate) fn utilization(total_budget: Decimal, total_spent: Decimal) -> Decimal {
    if total_budget <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_spent
        .checked_div(total_budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests;
