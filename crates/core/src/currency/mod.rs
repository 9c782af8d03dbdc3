//! Converted amounts and derived currency fields.

pub mod conversion;
pub mod enrich;

#[cfg(test)]
mod props;

pub use conversion::{FieldNaming, convert_amount, converted_field_name};
pub use enrich::{Amount, BaseAmount, ConversionOverflow, Converted, attach_converted};
