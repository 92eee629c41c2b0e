//! Money calculation using rust_decimal
//!
//! Amounts travel as `f64` on the wire and in SQLite; every sum and
//! comparison is done in `Decimal`.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Round half-up to cents
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// `price * quantity` summed over all lines
pub fn line_total(lines: impl IntoIterator<Item = (f64, i32)>) -> Decimal {
    lines
        .into_iter()
        .map(|(price, quantity)| to_decimal(price) * Decimal::from(quantity))
        .sum()
}

/// Equal within [`MONEY_TOLERANCE`]
pub fn money_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= MONEY_TOLERANCE
}
