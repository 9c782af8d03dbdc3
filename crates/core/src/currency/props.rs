//! Property-based tests for currency conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::conversion::{CONVERTED_DECIMAL_PLACES, convert_amount};

/// Strategy to generate budget amounts (0.01 to 10,000,000.00).
fn budget_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.000001 to 100000.000000).
fn exchange_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converted amounts never carry more than 2 decimal places.
    #[test]
    fn prop_convert_keeps_two_decimals(
        amount in budget_amount(),
        rate in exchange_rate(),
    ) {
        let result = convert_amount(amount, rate).unwrap();
        prop_assert!(result.scale() <= CONVERTED_DECIMAL_PLACES);
    }

    /// Rounding moves the exact product by at most half a cent.
    #[test]
    fn prop_convert_within_half_cent(
        amount in budget_amount(),
        rate in exchange_rate(),
    ) {
        let exact = amount * rate;
        let result = convert_amount(amount, rate).unwrap();
        prop_assert!((result - exact).abs() <= Decimal::new(5, 3));
    }

    /// A rate of one returns the amount itself.
    #[test]
    fn prop_unit_rate_is_identity(amount in budget_amount()) {
        prop_assert_eq!(convert_amount(amount, Decimal::ONE), Some(amount));
    }
}
