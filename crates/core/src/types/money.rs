//! Money amounts using decimal arithmetic.
//!
//! Prices arrive from the platform as decimal strings and are kept as
//! [`Decimal`] end to end. Rounding only happens for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to cents, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount with exactly two decimal places (e.g. `"12.50"`).
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}
