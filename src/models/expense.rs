use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Category;

/// A single recorded spend. Built only by the store, which validates the
/// amount and description before appending.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub category: Category,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

impl Expense {
    pub(crate) fn new(
        category: Category,
        amount: Decimal,
        description: String,
        date: NaiveDate,
    ) -> Self {
        Self {
            category,
            amount,
            description,
            date,
        }
    }

    /// Format: "YYYY-MM-DD"
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
