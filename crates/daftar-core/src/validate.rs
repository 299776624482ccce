//! # Registration Form Validation
//!
//! Validates both registration fields at once and returns every failure,
//! not just the first. Pure function of its inputs.

use crate::error::ValidationErrors;
use crate::identity::{FullName, IcNumber};

/// Validate a raw registration submission.
///
/// On success returns the parsed, normalized field values — callers work
/// with [`IcNumber`] and [`FullName`] from here on, never raw strings.
/// On failure returns a field → message mapping covering every field that
/// failed.
pub fn validate_registration(
    ic_number: &str,
    full_name: &str,
) -> Result<(IcNumber, FullName), ValidationErrors> {
    let mut errors = Vec::new();

    let ic = match IcNumber::new(ic_number) {
        Ok(ic) => Some(ic),
        Err(e) => {
            errors.push(e);
            None
        }
    };
    let name = match FullName::new(full_name) {
        Ok(name) => Some(name),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    match (ic, name) {
        (Some(ic), Some(name)) if errors.is_empty() => Ok((ic, name)),
        _ => Err(ValidationErrors(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Field;

    #[test]
    fn valid_submission_parses_both_fields() {
        let (ic, name) = validate_registration("123456789012", "Ahmad Bin Ali").unwrap();
        assert_eq!(ic.as_str(), "123456789012");
        assert_eq!(name.as_str(), "AHMAD BIN ALI");
    }

    #[test]
    fn short_ic_is_rejected() {
        let errs = validate_registration("12345", "Ahmad Bin Ali").unwrap_err();
        assert_eq!(errs.0.len(), 1);
        assert_eq!(errs.0[0].field, Field::IcNumber);
    }

    #[test]
    fn ic_with_letter_is_rejected() {
        assert!(validate_registration("12345678901a", "Ahmad Bin Ali").is_err());
    }

    #[test]
    fn name_with_digit_is_rejected() {
        let errs = validate_registration("123456789012", "Ahmad123").unwrap_err();
        assert_eq!(errs.0[0].field, Field::FullName);
    }

    #[test]
    fn both_fields_reported_together() {
        let errs = validate_registration("", "").unwrap_err();
        let fields: Vec<Field> = errs.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::IcNumber, Field::FullName]);
    }

    #[test]
    fn mixed_case_name_is_accepted_and_normalized() {
        let (_, name) = validate_registration("123456789012", "ahmad bin ali").unwrap();
        assert_eq!(name.as_str(), "AHMAD BIN ALI");
    }
}
