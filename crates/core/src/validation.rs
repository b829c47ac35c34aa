//! Required-field checks for create requests.

use crate::error::CoreError;

/// Returns the trimmed value when it is present and not blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Ensure every `(field, value)` pair carries a non-blank value.
///
/// Fails with `message` on the first missing field; the field name is only
/// used for the error detail so callers can keep their public messages short
/// and fixed.
pub fn require_fields(fields: &[(&str, Option<&str>)], message: &str) -> Result<(), CoreError> {
    match fields.iter().find(|(_, value)| non_blank(*value).is_none()) {
        Some(_) => Err(CoreError::Validation(message.to_string())),
        None => Ok(()),
    }
}
