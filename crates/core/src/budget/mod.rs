//! Project budget schema and payload validation.

pub mod fields;
pub mod validation;

pub use fields::{
    BudgetField, FieldKind, IDENTITY, PAYLOAD_FIELDS, TABLE, loose_integer, to_columns,
};
pub use validation::{Payload, ValidationErrors, validate_create, validate_update};
