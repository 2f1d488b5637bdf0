//! Client-side rules applied to a draft before it is submitted.

use crate::error::AppError;
use crate::models::{EmployeeDraft, EmployeeField};

/// Kind of rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Text is empty or whitespace.
    Required,
    /// Text is a number rather than a word.
    NotNumeric,
    /// Date text could not be parsed.
    InvalidDate,
}

/// One broken rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: EmployeeField,
    pub rule: Rule,
}

impl FieldViolation {
    pub fn new(field: EmployeeField, rule: Rule) -> Self {
        Self { field, rule }
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        let label = self.field.label();
        match self.rule {
            Rule::Required => format!("{label} must not be empty."),
            Rule::NotNumeric => format!("{label} must not be a number."),
            Rule::InvalidDate => format!("{label} is not a valid date."),
        }
    }
}

impl From<FieldViolation> for AppError {
    fn from(v: FieldViolation) -> Self {
        AppError::Validation {
            field: Some(v.field),
            message: v.message(),
        }
    }
}

/// Check a single text field. Emptiness wins over the numeric check.
pub fn check_text(field: EmployeeField, value: &str) -> Option<FieldViolation> {
    let value = value.trim();
    if value.is_empty() {
        return Some(FieldViolation::new(field, Rule::Required));
    }
    if is_numeric(value) {
        return Some(FieldViolation::new(field, Rule::NotNumeric));
    }
    None
}

/// Digits with optional sign and decimal separators only.
fn is_numeric(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+'))
}

/// Validate every required field and collect all violations.
///
/// The admission date is not required.
pub fn validate(draft: &EmployeeDraft) -> Result<(), Vec<FieldViolation>> {
    let violations: Vec<_> = EmployeeField::REQUIRED
        .into_iter()
        .filter_map(|field| check_text(field, draft.text(field).unwrap_or_default()))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, role: &str, department: &str) -> EmployeeDraft {
        EmployeeDraft {
            name: name.to_string(),
            role: role.to_string(),
            department: department.to_string(),
            admission_date: None,
        }
    }

    #[test]
    fn test_valid_draft_without_admission_date() {
        assert!(validate(&draft("Ana", "Dev", "Eng")).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let errors = validate(&draft("", "Dev", "Eng")).unwrap_err();

        assert_eq!(errors, vec![FieldViolation::new(EmployeeField::Name, Rule::Required)]);
        assert_eq!(errors[0].message(), "Name must not be empty.");
    }

    #[test]
    fn test_all_violations_reported_in_field_order() {
        let errors = validate(&draft("  ", "42", "")).unwrap_err();

        assert_eq!(
            errors,
            vec![
                FieldViolation::new(EmployeeField::Name, Rule::Required),
                FieldViolation::new(EmployeeField::Role, Rule::NotNumeric),
                FieldViolation::new(EmployeeField::Department, Rule::Required),
            ]
        );
    }

    #[test]
    fn test_numeric_text_has_distinct_message() {
        let v = check_text(EmployeeField::Department, "3.5").unwrap();

        assert_eq!(v.rule, Rule::NotNumeric);
        assert_eq!(v.message(), "Department must not be a number.");
    }

    #[test]
    fn test_text_with_digits_is_accepted() {
        assert!(check_text(EmployeeField::Role, "Dev 2").is_none());
        assert!(check_text(EmployeeField::Name, "R2D2").is_none());
        assert!(check_text(EmployeeField::Name, "Nan").is_none());
    }

    #[test]
    fn test_violation_converts_to_tagged_error() {
        let err: AppError = FieldViolation::new(EmployeeField::Role, Rule::Required).into();

        assert!(matches!(
            err,
            AppError::Validation {
                field: Some(EmployeeField::Role),
                ..
            }
        ));
    }
}
