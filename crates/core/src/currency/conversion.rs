//! Currency conversion logic.
//!
//! Converted amounts are derived on read from the USD base amount and are
//! never stored. They are rounded to 2 decimal places, half away from zero.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Decimal places kept on a converted amount.
pub const CONVERTED_DECIMAL_PLACES: u32 = 2;

/// Converts a base amount using the given exchange rate.
///
/// Returns `None` if the product does not fit in a `Decimal`.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate).map(|converted| {
        converted.round_dp_with_strategy(
            CONVERTED_DECIMAL_PLACES,
            RoundingStrategy::MidpointAwayFromZero,
        )
    })
}

/// How the currency code is spelled in a derived field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldNaming {
    /// Code exactly as the caller supplied it: `finalBudgetEUR`.
    AsSupplied,
    /// First letter upper, rest lower: `finalBudgetTtd`.
    TitleCase,
}

/// Name of the derived field holding the amount in `code`.
#[must_use]
pub fn converted_field_name(code: &str, naming: FieldNaming) -> String {
    match naming {
        FieldNaming::AsSupplied => format!("finalBudget{code}"),
        FieldNaming::TitleCase => {
            let mut chars = code.chars();
            let title: String = chars
                .next()
                .map(|first| {
                    first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect()
                })
                .unwrap_or_default();
            format!("finalBudget{title}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_amount() {
        // 100 USD * 0.8 = 80.00 EUR
        assert_eq!(convert_amount(dec!(100), dec!(0.8)), Some(dec!(80.00)));
    }

    #[test]
    fn test_convert_rounds_to_cents() {
        // 237303.15 * 6.7812 = 1609200.12078 -> 1609200.12
        assert_eq!(
            convert_amount(dec!(237303.15), dec!(6.7812)),
            Some(dec!(1609200.12))
        );
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        // 0.125 -> 0.13, -0.125 -> -0.13
        assert_eq!(convert_amount(dec!(0.125), Decimal::ONE), Some(dec!(0.13)));
        assert_eq!(convert_amount(dec!(-0.125), Decimal::ONE), Some(dec!(-0.13)));
    }

    #[test]
    fn test_overflow_is_none() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        assert_eq!(convert_amount(huge, dec!(10)), None);
        assert_eq!(convert_amount(Decimal::MAX, dec!(2)), None);
        assert_eq!(convert_amount(Decimal::MAX, Decimal::ONE), Some(Decimal::MAX));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(converted_field_name("EUR", FieldNaming::AsSupplied), "finalBudgetEUR");
        assert_eq!(converted_field_name("eur", FieldNaming::AsSupplied), "finalBudgeteur");
        assert_eq!(converted_field_name("TTD", FieldNaming::TitleCase), "finalBudgetTtd");
        assert_eq!(converted_field_name("", FieldNaming::TitleCase), "finalBudget");
    }
}
