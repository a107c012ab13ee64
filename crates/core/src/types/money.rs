//! Money rounding for derived cart amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to two decimal places, half away from zero.
///
/// Derived amounts (promotional discount, tax) are rounded independently
/// before they enter the cart total; raw subtotals are never rounded.
///
/// ## Examples
///
/// ```
/// use clementine_core::round_to_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_to_cents(Decimal::new(10005, 3)), Decimal::new(1001, 2)); // 10.005 -> 10.01
/// assert_eq!(round_to_cents(Decimal::new(1000, 2)), Decimal::new(1000, 2));
/// ```
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 2.345 -> 2.35, not banker's 2.34
        assert_eq!(round_to_cents(Decimal::new(2345, 3)), Decimal::new(235, 2));
        // -2.345 -> -2.35
        assert_eq!(
            round_to_cents(Decimal::new(-2345, 3)),
            Decimal::new(-235, 2)
        );
    }

    #[test]
    fn test_leaves_two_decimal_values_alone() {
        assert_eq!(round_to_cents(Decimal::new(1999, 2)), Decimal::new(1999, 2));
        assert_eq!(round_to_cents(Decimal::ZERO), Decimal::ZERO);
    }
}
