//! Common validation utilities.

use validator::ValidationError;

/// Largest point magnitude accepted in a single assignment or rule.
pub const MAX_POINT_MAGNITUDE: i32 = 10_000;

/// Validates that a text field is not blank after trimming.
///
/// `length(min = 1)` alone accepts all-whitespace input.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("Must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a point value (delta or rule value) is within bounds.
pub fn validate_point_value(value: i32) -> Result<(), ValidationError> {
    if (-MAX_POINT_MAGNITUDE..=MAX_POINT_MAGNITUDE).contains(&value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("point_range");
        err.message = Some(format!("Points must be between -{0} and {0}", MAX_POINT_MAGNITUDE).into());
        Err(err)
    }
}
