use crate::spec::{FieldType, FormField};

pub const MIN_RATING_BOUND: u8 = 2;
pub const MAX_RATING_BOUND: u8 = 10;
pub const MIN_CHOICE_OPTIONS: usize = 2;

/// Outcome of a structural validation pass. Failures are messages, never
/// panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn ok() -> Self {
        Self::from_errors(Vec::new())
    }
}

/// Structural validation of one field in isolation, the per-edit gate.
pub fn validate_field(field: &FormField) -> ValidationReport {
    ValidationReport::from_errors(field_errors(field))
}

fn field_errors(field: &FormField) -> Vec<String> {
    let mut errors = Vec::new();

    if field.label.trim().is_empty() {
        errors.push("Label is required".to_string());
    }

    if field.kind.is_choice() {
        match &field.options {
            Some(options) if options.len() >= MIN_CHOICE_OPTIONS => {
                if options.iter().any(|option| option.trim().is_empty()) {
                    errors.push("Options cannot be blank".to_string());
                }
            }
            _ => {
                errors.push(format!(
                    "Choice fields need at least {} options",
                    MIN_CHOICE_OPTIONS
                ));
            }
        }
    }

    if field.kind == FieldType::Rating {
        let max_rating = field.max_rating_or_default();
        if !(MIN_RATING_BOUND..=MAX_RATING_BOUND).contains(&max_rating) {
            errors.push(format!(
                "Max rating must be between {} and {}",
                MIN_RATING_BOUND, MAX_RATING_BOUND
            ));
        }
    }

    errors
}

/// Whole-form gate run before a sequence counts as submittable/exportable.
///
/// An empty sequence short-circuits with a single error; otherwise every
/// field is checked in order and messages carry a 1-based field number.
pub fn validate_form(fields: &[FormField]) -> ValidationReport {
    if fields.is_empty() {
        return ValidationReport::from_errors(vec![
            "Form must have at least one field".to_string(),
        ]);
    }

    let mut errors = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        for error in field_errors(field) {
            errors.push(format!("Field {}: {}", index + 1, error));
        }
    }
    ValidationReport::from_errors(errors)
}
