//! Field-level checks shared by the payload validators.

use crate::error::FieldErrors;

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";

/// A required, non-blank string. Surrounding whitespace is trimmed.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
) -> Option<String> {
    match value.map(str::trim) {
        None => {
            errors.add(field, MSG_REQUIRED);
            None
        }
        Some("") => {
            errors.add(field, MSG_BLANK);
            None
        }
        Some(text) => Some(text.to_string()),
    }
}
