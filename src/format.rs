use rust_decimal::{Decimal, RoundingStrategy};

/// Round to whole cents, halves away from zero (`12.345` → `12.35`).
pub(crate) fn round_cents(val: Decimal) -> Decimal {
    val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.891` → `"$1,234,567.89"`, `-20` → `"-$20.00"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let rounded = round_cents(val);
    let formatted = format!("{:.2}", rounded.abs());
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if rounded < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Format a percentage to 2 decimal places, e.g. `85` → `"85.00%"`.
pub(crate) fn format_percent(val: Decimal) -> String {
    format!("{:.2}%", round_cents(val))
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod format_tests;
