//! Attaching converted amounts to records.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::conversion::convert_amount;

/// A record carrying an amount in the base currency.
pub trait BaseAmount {
    /// The base-currency amount conversions are derived from.
    fn base_amount(&self) -> Decimal;
}

/// A decimal amount serialized as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Amount(#[serde(with = "rust_decimal::serde::float")] pub Decimal);

/// A record plus derived fields, flattened together when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Converted<T> {
    /// The stored record.
    #[serde(flatten)]
    pub record: T,
    /// Derived amounts keyed by field name.
    #[serde(flatten)]
    pub amounts: BTreeMap<String, Amount>,
}

impl<T> Converted<T> {
    /// Wraps a record with no derived fields.
    #[must_use]
    pub fn unchanged(record: T) -> Self {
        Self {
            record,
            amounts: BTreeMap::new(),
        }
    }
}

/// A converted amount fell outside the range of `Decimal`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Converting {amount} at rate {rate} overflows")]
pub struct ConversionOverflow {
    /// Base amount being converted.
    pub amount: Decimal,
    /// Rate applied.
    pub rate: Decimal,
}

/// Adds `field = base_amount × rate` to every record.
///
/// # Errors
///
/// Returns [`ConversionOverflow`] for the first record whose converted
/// amount does not fit.
pub fn attach_converted<T: BaseAmount>(
    records: Vec<T>,
    field: &str,
    rate: Decimal,
) -> Result<Vec<Converted<T>>, ConversionOverflow> {
    records
        .into_iter()
        .map(|record| {
            let base = record.base_amount();
            let amount = convert_amount(base, rate)
                .ok_or(ConversionOverflow { amount: base, rate })?;
            let mut converted = Converted::unchanged(record);
            converted.amounts.insert(field.to_string(), Amount(amount));
            Ok(converted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Row {
        project_name: String,
        #[serde(with = "rust_decimal::serde::float")]
        final_budget_usd: Decimal,
    }

    impl BaseAmount for Row {
        fn base_amount(&self) -> Decimal {
            self.final_budget_usd
        }
    }

    fn row(name: &str, usd: Decimal) -> Row {
        Row {
            project_name: name.to_string(),
            final_budget_usd: usd,
        }
    }

    #[test]
    fn test_attach_converted_rounds_each_row() {
        let rows = vec![row("Alpha", dec!(100)), row("Beta", dec!(33.335))];
        let converted = attach_converted(rows, "finalBudgetEUR", dec!(0.8)).unwrap();

        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].amounts["finalBudgetEUR"], Amount(dec!(80.00)));
        assert_eq!(converted[1].amounts["finalBudgetEUR"], Amount(dec!(26.67)));
    }

    #[test]
    fn test_serializes_flat() {
        let converted =
            attach_converted(vec![row("Alpha", dec!(100))], "finalBudgetEUR", dec!(0.8)).unwrap();
        let value = serde_json::to_value(&converted[0]).unwrap();

        assert_eq!(
            value,
            json!({
                "projectName": "Alpha",
                "finalBudgetUsd": 100.0,
                "finalBudgetEUR": 80.0
            })
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let rows = vec![row("Alpha", dec!(1)), row("Huge", huge)];

        let err = attach_converted(rows, "finalBudgetEUR", dec!(10)).unwrap_err();
        assert_eq!(err, ConversionOverflow { amount: huge, rate: dec!(10) });
    }

    #[test]
    fn test_unchanged_adds_nothing() {
        let value = serde_json::to_value(Converted::unchanged(row("Alpha", dec!(5)))).unwrap();
        assert_eq!(value, json!({ "projectName": "Alpha", "finalBudgetUsd": 5.0 }));
    }
}
