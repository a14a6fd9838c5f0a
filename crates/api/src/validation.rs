//! Request validation rules and error messages.
//!
//! Request bodies derive `validator::Validate`. A field that is missing or
//! empty fails with code `required`; any other rule failure reports the
//! field as not valid. Messages name the field in title case, e.g.
//! `field Currency is a required field`.

use invoicer_shared::{CreditAmount, is_iso4217};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

/// Error code for a missing or empty field.
pub const REQUIRED: &str = "required";

/// Message returned when the body cannot be decoded.
pub const DECODE_FAILED: &str = "Failed to decode request";

/// Accepts ISO 4217 alphabetic codes. Empty input is left to `length`.
pub fn iso4217(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_iso4217(value) {
        Ok(())
    } else {
        Err(ValidationError::new("iso4217"))
    }
}

/// Accepts amounts a wallet balance can hold: not negative, at most four
/// decimal places, no larger than `MAX_BALANCE`.
pub fn credit_amount(value: &Decimal) -> Result<(), ValidationError> {
    CreditAmount::new(*value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("amount"))
}

/// Treats the nil UUID as an absent value.
pub fn not_nil(value: &Uuid) -> Result<(), ValidationError> {
    if value.is_nil() {
        Err(ValidationError::new(REQUIRED))
    } else {
        Ok(())
    }
}

/// `field Name is a required field`.
pub fn required_field(field: &str) -> String {
    format!("field {} is a required field", display_name(field))
}

/// `field Name is not valid`.
pub fn invalid_field(field: &str) -> String {
    format!("field {} is not valid", display_name(field))
}

/// Renders every failing field, one clause per field, joined with `", "`.
///
/// Fields are listed in name order so the message is stable.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .map(|(field, errs)| {
            if errs.iter().any(|e| e.code == REQUIRED) {
                required_field(&field)
            } else {
                invalid_field(&field)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_name(field: &str) -> String {
    let mut chars = field.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
