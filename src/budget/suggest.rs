use rust_decimal::Decimal;

use crate::format::{format_amount, format_percent};

const OVERSPENT_ADVICE: &[&str] = &[
    "Review and cut non-essential expenses",
    "Consider reallocating funds from lower-priority categories",
    "Look for cost-effective alternatives for expensive items",
];

const NEAR_LIMIT_ADVICE: &[&str] = &[
    "Carefully monitor remaining expenses",
    "Prioritize essential expenses",
    "Consider saving some budget for unexpected costs",
];

/// Rule-based feedback on how the budget is holding up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    SetBudget,
    Overspent { overage: Decimal },
    NearLimit { percent: Decimal },
    Healthy { percent: Decimal, remaining: Decimal },
}

impl Suggestion {
    /// Spending above 80% of the budget (up to and including 100%) is near
    /// the limit; anything past the budget is an overspend.
    pub fn evaluate(total_budget: Decimal, total_spent: Decimal) -> Self {
        if total_budget <= Decimal::ZERO {
            return Self::SetBudget;
        }
        if total_spent > total_budget {
            return Self::Overspent {
                overage: total_spent - total_budget,
            };
        }

        let percent = super::utilization(total_budget, total_spent);
        if past_near_limit(total_budget, total_spent) {
            Self::NearLimit { percent }
        } else {
            Self::Healthy {
                percent,
                remaining: total_budget - total_spent,
            }
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Overspent { .. } | Self::NearLimit { .. })
    }

    pub fn headline(&self) -> String {
        match self {
            Self::SetBudget => "Please set a total budget to receive suggestions.".into(),
            Self::Overspent { overage } => format!(
                "Warning: You have exceeded your budget by {}",
                format_amount(*overage)
            ),
            Self::NearLimit { percent } => format!(
                "Note: You have used {} of your budget",
                format_percent(*percent)
            ),
            Self::Healthy { percent, .. } => format!(
                "Your budget utilization is healthy at {}",
                format_percent(*percent)
            ),
        }
    }

    /// Lines shown under the headline.
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::SetBudget => Vec::new(),
            Self::Overspent { .. } => advice_lines(OVERSPENT_ADVICE),
            Self::NearLimit { .. } => advice_lines(NEAR_LIMIT_ADVICE),
            Self::Healthy { remaining, .. } => {
                vec![format!("Remaining budget: {}", format_amount(*remaining))]
            }
        }
    }
}

/// `spent / budget > 0.80` without dividing: with `0 <= spent <= budget`
/// that is `(budget - spent) * 5 < budget`. The subtraction cannot overflow,
/// and a product too large to represent is already well clear of the limit.
fn past_near_limit(total_budget: Decimal, total_spent: Decimal) -> bool {
    (total_budget - total_spent)
        .checked_mul(Decimal::from(5))
        .is_some_and(|scaled| scaled < total_budget)
}

fn advice_lines(advice: &[&str]) -> Vec<String> {
    std::iter::once("Suggestions:".to_string())
        .chain(advice.iter().map(|a| format!("  - {a}")))
        .collect()
}
