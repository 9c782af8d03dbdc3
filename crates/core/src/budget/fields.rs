//! Budget payload fields, their storage columns, and value coercion.
//!
//! Payloads arrive as loosely typed JSON. Numbers may be sent as strings and
//! integers as floats with no fraction, so every field is coerced through
//! its string form before it is bound to a statement.

use rust_decimal::Decimal;
use serde_json::Value;

use super::validation::{Payload, ValidationErrors};
use crate::query::SqlValue;

/// Table holding project budgets.
pub const TABLE: &str = "project";

/// How a field's value is checked and bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string.
    Text,
    /// Integer, optionally signed.
    Integer,
    /// Decimal number, optionally with fraction and exponent.
    Float,
}

/// A payload field and the column it is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetField {
    /// Name in JSON payloads and responses.
    pub name: &'static str,
    /// Storage column.
    pub column: &'static str,
    /// Value kind.
    pub kind: FieldKind,
}

impl BudgetField {
    const fn new(name: &'static str, column: &'static str, kind: FieldKind) -> Self {
        Self { name, column, kind }
    }

    /// Coerces a JSON value into a bindable value, or `None` if the value
    /// does not fit this field's kind.
    #[must_use]
    pub fn coerce(&self, value: &Value) -> Option<SqlValue> {
        match self.kind {
            FieldKind::Text => match value {
                Value::String(s) if !s.is_empty() => Some(SqlValue::Text(s.clone())),
                _ => None,
            },
            FieldKind::Integer => loose_integer(value).map(SqlValue::Int),
            FieldKind::Float => {
                let text = loose_string(value)?;
                is_float(&text)
                    .then(|| parse_decimal(&text))
                    .flatten()
                    .map(SqlValue::Decimal)
            }
        }
    }
}

/// The identity field, assigned on insert and never updated.
pub const IDENTITY: BudgetField = BudgetField::new("projectId", "project_id", FieldKind::Integer);

/// Every non-identity field, in column order.
pub const PAYLOAD_FIELDS: [BudgetField; 10] = [
    BudgetField::new("projectName", "project_name", FieldKind::Text),
    BudgetField::new("year", "year", FieldKind::Integer),
    BudgetField::new("currency", "currency", FieldKind::Text),
    BudgetField::new("initialBudgetLocal", "initial_budget_local", FieldKind::Float),
    BudgetField::new("budgetUsd", "budget_usd", FieldKind::Float),
    BudgetField::new(
        "initialScheduleEstimateMonths",
        "initial_schedule_estimate_months",
        FieldKind::Float,
    ),
    BudgetField::new(
        "adjustedScheduleEstimateMonths",
        "adjusted_schedule_estimate_months",
        FieldKind::Float,
    ),
    BudgetField::new("contingencyRate", "contingency_rate", FieldKind::Float),
    BudgetField::new("escalationRate", "escalation_rate", FieldKind::Float),
    BudgetField::new("finalBudgetUsd", "final_budget_usd", FieldKind::Float),
];

/// Maps a validated payload to `(column, value)` pairs in column order.
///
/// Keys outside the schema are ignored, so column names always come from
/// [`PAYLOAD_FIELDS`] and never from the request.
///
/// # Errors
///
/// Returns every field whose value cannot be coerced.
pub fn to_columns(
    payload: &Payload,
    include_identity: bool,
) -> Result<Vec<(&'static str, SqlValue)>, ValidationErrors> {
    let identity = include_identity.then_some(IDENTITY);
    let mut columns = Vec::with_capacity(PAYLOAD_FIELDS.len() + 1);
    let mut errors = ValidationErrors::default();

    for field in identity.iter().chain(PAYLOAD_FIELDS.iter()) {
        match payload.get(field.name).and_then(|value| field.coerce(value)) {
            Some(value) => columns.push((field.column, value)),
            None => errors.push_invalid(field.name),
        }
    }

    errors.into_result().map(|()| columns)
}

/// Integer held by a loosely typed JSON value: `2005`, `2005.0` and
/// `"2005"` all give `2005`. Fractions, non-numeric text and values outside
/// `i64` give `None`.
#[must_use]
pub fn loose_integer(value: &Value) -> Option<i64> {
    let text = loose_string(value)?;
    is_int(&text).then(|| text.parse().ok()).flatten()
}

/// String form of a scalar JSON value: `2005.0` becomes `"2005"`, `true`
/// becomes `"true"`. Arrays, objects and null have none.
pub(crate) fn loose_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| f.to_string())
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// `^[+-]?[0-9]+$`
pub(crate) fn is_int(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `^[+-]?([0-9]+)?(\.[0-9]*)?([eE][+-]?[0-9]+)?$`, excluding `""`, `"."`,
/// `"+"` and `"-"`.
pub(crate) fn is_float(text: &str) -> bool {
    if matches!(text, "" | "." | "+" | "-") {
        return false;
    }

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (mantissa, ""),
    };
    let mantissa_ok = whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());

    let exponent_ok = exponent.is_none_or(is_int);

    mantissa_ok && exponent_ok
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };

    let mut normalized = String::with_capacity(mantissa.len() + 2);
    if mantissa.is_empty() || mantissa.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(mantissa);
    if normalized.ends_with('.') {
        normalized.push('0');
    }

    match exponent {
        Some(exponent) => {
            let exponent = exponent.strip_prefix('+').unwrap_or(exponent);
            Decimal::from_scientific(&format!("{sign}{normalized}e{exponent}")).ok()
        }
        None => format!("{sign}{normalized}").parse().ok(),
    }
}
