//! Payload validation for budget create and update requests.
//!
//! Every rule runs independently and all violations are collected.
//! Presence is a truthiness test: a missing key, `null`, `false`, `""`
//! and the number `0` all count as absent, so a numeric field holding `0`
//! is rejected.

use serde_json::{Number, Value};
use std::num::FpCategory;
use thiserror::Error;

use super::fields::{FieldKind, IDENTITY, PAYLOAD_FIELDS, is_float, is_int, loose_string};

/// Untyped JSON object as received from a client.
pub type Payload = serde_json::Map<String, Value>;

/// Human-readable messages for every rule a payload violated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .messages.join("; "))]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    /// Records a missing or malformed field.
    pub fn push_invalid(&mut self, field: &str) {
        self.messages.push(format!("Invalid or missing {field}"));
    }

    /// Records a free-form message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Returns true if no rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The collected messages, in rule order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consumes the list, returning the messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` if any message was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Validates a payload for creating a budget: every field plus `projectId`.
///
/// # Errors
///
/// Returns one message per violated rule.
pub fn validate_create(payload: &Payload) -> Result<(), ValidationErrors> {
    let mut errors = check_fields(payload);
    if !is_valid(payload, IDENTITY.name, IDENTITY.kind) {
        errors.push_invalid(IDENTITY.name);
    }
    errors.into_result()
}

/// Validates a payload for updating a budget: every field, and no
/// `projectId`.
///
/// # Errors
///
/// Returns one message per violated rule.
pub fn validate_update(payload: &Payload) -> Result<(), ValidationErrors> {
    let mut errors = check_fields(payload);
    if is_present(payload.get(IDENTITY.name)) {
        errors.push(format!("Can not Update {}", IDENTITY.name));
    }
    errors.into_result()
}

fn check_fields(payload: &Payload) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in &PAYLOAD_FIELDS {
        if !is_valid(payload, field.name, field.kind) {
            errors.push_invalid(field.name);
        }
    }
    errors
}

fn is_valid(payload: &Payload, name: &str, kind: FieldKind) -> bool {
    let Some(value) = payload.get(name).filter(|value| is_truthy(value)) else {
        return false;
    };

    match kind {
        FieldKind::Text => value.as_str().is_some_and(|s| !s.is_empty()),
        FieldKind::Integer => loose_string(value).is_some_and(|text| is_int(&text)),
        FieldKind::Float => loose_string(value).is_some_and(|text| is_float(&text)),
    }
}

fn is_present(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !is_zero(n),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_zero(n: &Number) -> bool {
    n.as_f64().is_some_and(|f| f.classify() == FpCategory::Zero)
}
