#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn state_with_budget(amount: Decimal) -> BudgetState {
    let mut state = BudgetState::new();
    state.set_total_budget(amount).unwrap();
    state
}

// ── Defaults ──────────────────────────────────────────────────

#[test]
fn test_new_state_is_empty() {
    let state = BudgetState::new();
    assert_eq!(state.total_budget(), Decimal::ZERO);
    assert!(state.expenses().is_empty());
    assert_eq!(state.total_spent(), Decimal::ZERO);
    assert_eq!(state.remaining(), Decimal::ZERO);
    assert_eq!(state.utilization_percent(), Decimal::ZERO);
    assert!(state.category_totals().is_empty());
    assert_eq!(state.suggestion(), Suggestion::SetBudget);
}

// ── set_total_budget ──────────────────────────────────────────

#[test]
fn test_set_budget_replaces_previous() {
    let mut state = state_with_budget(dec!(100));
    state.set_total_budget(dec!(250)).unwrap();
    assert_eq!(state.total_budget(), dec!(250));
}

#[test]
fn test_set_budget_rejects_zero_and_negative() {
    let mut state = state_with_budget(dec!(100));
    state
        .add_expense_on(Category::Food, dec!(10), "snack", day(1))
        .unwrap();

    for bad in [Decimal::ZERO, dec!(-5)] {
        let err = state.set_total_budget(bad).unwrap_err();
        assert!(matches!(err, BudgetError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Please enter a valid budget amount");
    }

    assert_eq!(state.total_budget(), dec!(100));
    assert_eq!(state.expenses().len(), 1);
}

#[test]
fn test_set_budget_rejected_on_fresh_state() {
    let mut state = BudgetState::new();
    assert!(state.set_total_budget(dec!(-5)).is_err());
    assert_eq!(state.total_budget(), Decimal::ZERO);
}

// ── add_expense ───────────────────────────────────────────────

#[test]
fn test_add_expense_rejects_zero_amount() {
    let mut state = state_with_budget(dec!(100));
    let err = state.add_expense(Category::Food, Decimal::ZERO, "lunch").unwrap_err();
    assert!(matches!(err, BudgetError::InvalidInput(_)));
    assert!(state.expenses().is_empty());
}

#[test]
fn test_add_expense_rejects_negative_amount() {
    let mut state = state_with_budget(dec!(100));
    assert!(state.add_expense(Category::Food, dec!(-3), "refund").is_err());
    assert!(state.expenses().is_empty());
}

#[test]
fn test_add_expense_rejects_empty_description() {
    let mut state = state_with_budget(dec!(100));
    let err = state.add_expense(Category::Food, dec!(10), "").unwrap_err();
    assert_eq!(err, BudgetError::InvalidInput(INVALID_EXPENSE.into()));
    assert!(state.expenses().is_empty());
}

#[test]
fn test_add_expense_uses_today() {
    let mut state = BudgetState::new();
    let today = chrono::Local::now().date_naive();
    let expense = state.add_expense(Category::Other, dec!(1), "gum").unwrap();
    // Allow for the date rolling over mid-test
    assert!(expense.date == today || expense.date == today.succ_opt().unwrap());
}

#[test]
fn test_add_expense_keeps_description_as_given() {
    let mut state = BudgetState::new();
    let expense = state
        .add_expense_on(Category::Food, dec!(4.50), "  coffee ", day(2))
        .unwrap();
    assert_eq!(expense.description, "  coffee ");

    // Any non-empty text is a description, whitespace included
    let expense = state.add_expense_on(Category::Other, dec!(1), " ", day(2)).unwrap();
    assert_eq!(expense.description, " ");
    assert_eq!(state.expenses().len(), 2);
}

#[test]
fn test_add_expense_without_budget_is_allowed() {
    let mut state = BudgetState::new();
    state
        .add_expense_on(Category::Food, dec!(30), "groceries", day(1))
        .unwrap();
    assert_eq!(state.total_spent(), dec!(30));
    assert_eq!(state.remaining(), dec!(-30));
    assert_eq!(state.utilization_percent(), Decimal::ZERO);
}

#[test]
fn test_expenses_keep_arrival_order() {
    let mut state = BudgetState::new();
    state.add_expense_on(Category::Transport, dec!(2), "bus", day(5)).unwrap();
    state.add_expense_on(Category::Food, dec!(8), "lunch", day(1)).unwrap();
    state.add_expense_on(Category::Other, dec!(1), "gum", day(3)).unwrap();

    let descs: Vec<&str> = state.expenses().iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descs, vec!["bus", "lunch", "gum"]);
}

#[test]
fn test_add_expense_rejects_overflowing_total() {
    let mut state = BudgetState::new();
    state.add_expense_on(Category::Other, Decimal::MAX, "everything", day(1)).unwrap();
    assert!(state.add_expense_on(Category::Other, dec!(1), "more", day(1)).is_err());
    assert_eq!(state.expenses().len(), 1);
}

// ── Derived figures ───────────────────────────────────────────

#[test]
fn test_total_spent_is_order_independent() {
    let amounts = [dec!(12.34), dec!(0.66), dec!(100), dec!(7.01)];

    let mut forward = BudgetState::new();
    for a in amounts {
        forward.add_expense_on(Category::Food, a, "x", day(1)).unwrap();
    }
    let mut backward = BudgetState::new();
    for a in amounts.iter().rev() {
        backward.add_expense_on(Category::Food, *a, "x", day(1)).unwrap();
    }

    assert_eq!(forward.total_spent(), dec!(120.01));
    assert_eq!(forward.total_spent(), backward.total_spent());
}

#[test]
fn test_remaining_matches_budget_minus_spent() {
    let mut state = state_with_budget(dec!(75));
    for (i, a) in [dec!(20), dec!(30), dec!(40)].into_iter().enumerate() {
        state.add_expense_on(Category::Food, a, "x", day(1)).unwrap();
        assert_eq!(state.remaining(), state.total_budget() - state.total_spent(), "step {i}");
    }
    assert_eq!(state.remaining(), dec!(-15));
}

#[test]
fn test_queries_are_repeatable() {
    let mut state = state_with_budget(dec!(100));
    state.add_expense_on(Category::Food, dec!(30), "groceries", day(1)).unwrap();
    for _ in 0..3 {
        assert_eq!(state.total_spent(), dec!(30));
        assert_eq!(state.remaining(), dec!(70));
        assert_eq!(state.utilization_percent(), dec!(30));
        assert_eq!(state.category_totals().len(), 1);
    }
}

#[test]
fn test_category_totals_merge_same_category() {
    let mut state = BudgetState::new();
    state.add_expense_on(Category::Food, dec!(30), "groceries", day(1)).unwrap();
    state.add_expense_on(Category::Food, dec!(12.5), "lunch", day(2)).unwrap();
    state.add_expense_on(Category::Transport, dec!(20), "bus", day(2)).unwrap();

    let totals = state.category_totals();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[&Category::Food], dec!(42.5));
    assert_eq!(totals[&Category::Transport], dec!(20));
}

#[test]
fn test_category_breakdown_sorted_by_amount() {
    let mut state = BudgetState::new();
    state.add_expense_on(Category::Transport, dec!(20), "bus", day(1)).unwrap();
    state.add_expense_on(Category::Food, dec!(30), "groceries", day(1)).unwrap();
    state.add_expense_on(Category::Utilities, dec!(20), "power", day(1)).unwrap();

    let breakdown = state.category_breakdown();
    assert_eq!(
        breakdown,
        vec![
            (Category::Food, dec!(30)),
            (Category::Transport, dec!(20)),
            (Category::Utilities, dec!(20)),
        ]
    );
}

#[test]
fn test_running_totals() {
    let mut state = BudgetState::new();
    state.add_expense_on(Category::Food, dec!(30), "groceries", day(1)).unwrap();
    state.add_expense_on(Category::Transport, dec!(20), "bus", day(2)).unwrap();
    state.add_expense_on(Category::Food, dec!(5.25), "coffee", day(3)).unwrap();
    assert_eq!(state.running_totals(), vec![dec!(30), dec!(50), dec!(55.25)]);
}

// ── Scenarios ─────────────────────────────────────────────────

#[test]
fn test_scenario_healthy() {
    let mut state = state_with_budget(dec!(100));
    state.add_expense_on(Category::Food, dec!(30), "groceries", day(1)).unwrap();
    state.add_expense_on(Category::Transport, dec!(20), "bus", day(1)).unwrap();

    assert_eq!(state.total_spent(), dec!(50));
    assert_eq!(state.remaining(), dec!(50));
    assert_eq!(state.utilization_percent(), dec!(50.0));
    assert_eq!(
        state.suggestion(),
        Suggestion::Healthy {
            percent: dec!(50),
            remaining: dec!(50),
        }
    );
}

#[test]
fn test_scenario_overspent() {
    let mut state = state_with_budget(dec!(100));
    state.add_expense_on(Category::Food, dec!(120), "party", day(1)).unwrap();

    assert_eq!(state.remaining(), dec!(-20));
    let suggestion = state.suggestion();
    assert_eq!(suggestion, Suggestion::Overspent { overage: dec!(20) });
    assert!(suggestion.headline().ends_with("$20.00"));
}

#[test]
fn test_scenario_near_limit() {
    let mut state = state_with_budget(dec!(100));
    state.add_expense_on(Category::Food, dec!(85), "catering", day(1)).unwrap();

    assert_eq!(state.utilization_percent(), dec!(85.0));
    assert_eq!(state.suggestion(), Suggestion::NearLimit { percent: dec!(85) });
}

#[test]
fn test_utilization_zero_without_budget_regardless_of_history() {
    let mut state = BudgetState::new();
    state.add_expense_on(Category::Food, dec!(999), "feast", day(1)).unwrap();
    assert_eq!(state.utilization_percent(), Decimal::ZERO);
    assert_eq!(state.suggestion(), Suggestion::SetBudget);
}

// ── Suggestion tiers ──────────────────────────────────────────

#[test]
fn test_suggestion_boundaries() {
    assert!(matches!(
        Suggestion::evaluate(dec!(100), dec!(80)),
        Suggestion::Healthy { .. }
    ));
    assert!(matches!(
        Suggestion::evaluate(dec!(100), dec!(80.01)),
        Suggestion::NearLimit { .. }
    ));
    // A ratio a hair past 0.80 that would round to 80% when divided
    assert!(matches!(
        Suggestion::evaluate(dec!(3), dec!(2.4)),
        Suggestion::Healthy { .. }
    ));
    assert!(matches!(
        Suggestion::evaluate(dec!(3), dec!(2.4000000000000000000000000001)),
        Suggestion::NearLimit { .. }
    ));
    assert!(matches!(
        Suggestion::evaluate(Decimal::MAX, Decimal::MAX),
        Suggestion::NearLimit { .. }
    ));
    // Exactly at the budget is still near-limit, not overspent
    assert_eq!(
        Suggestion::evaluate(dec!(100), dec!(100)),
        Suggestion::NearLimit { percent: dec!(100) }
    );
    assert_eq!(
        Suggestion::evaluate(dec!(100), dec!(100.01)),
        Suggestion::Overspent { overage: dec!(0.01) }
    );
}

#[test]
fn test_suggestion_text() {
    let healthy = Suggestion::evaluate(dec!(100), dec!(50));
    assert_eq!(healthy.headline(), "Your budget utilization is healthy at 50.00%");
    assert_eq!(healthy.details(), vec!["Remaining budget: $50.00".to_string()]);
    assert!(!healthy.is_warning());

    let near = Suggestion::evaluate(dec!(100), dec!(85));
    assert_eq!(near.headline(), "Note: You have used 85.00% of your budget");
    assert_eq!(near.details().len(), 4);
    assert!(near.is_warning());

    let over = Suggestion::evaluate(dec!(100), dec!(120));
    assert_eq!(over.headline(), "Warning: You have exceeded your budget by $20.00");
    assert_eq!(over.details()[0], "Suggestions:");
    assert!(over.details()[1].contains("non-essential"));

    let unset = Suggestion::evaluate(Decimal::ZERO, dec!(10));
    assert_eq!(unset.headline(), "Please set a total budget to receive suggestions.");
    assert!(unset.details().is_empty());
}

// ── Parsing ───────────────────────────────────────────────────

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("12.50"), Some(dec!(12.50)));
    assert_eq!(parse_amount(" $30 "), Some(dec!(30)));
    assert_eq!(parse_amount("-5"), Some(dec!(-5)));
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("$"), None);
}

#[test]
fn test_parse_category() {
    assert_eq!(parse_category("food").unwrap(), Category::Food);
    let err = parse_category("equipment").unwrap_err();
    assert!(matches!(err, BudgetError::InvalidInput(_)));
    assert!(err.to_string().contains("Food, Transport"));
}
