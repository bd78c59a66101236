use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::spec::{FieldType, FormField};
use crate::validate::ValidationReport;

/// One rejected answer, with a JSON-pointer path and a stable code for
/// programmatic consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResponseError {
    pub field_id: String,
    pub path: String,
    pub message: String,
    pub code: String,
}

/// Result of validating a whole submission against a field sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResponseValidation {
    pub valid: bool,
    pub errors: Vec<ResponseError>,
    pub missing_required: Vec<String>,
    pub unknown_fields: Vec<String>,
}

/// Submitted answers for one form, keyed by field id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSet {
    pub schema_version: String,
    pub responses: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub submitted_at: DateTime<Utc>,
}

impl ResponseSet {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Compact transport encoding.
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(self)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self, serde_cbor::Error> {
        serde_cbor::from_slice(bytes)
    }
}

/// Type-correct empty value for rendering: the renderer never sees an
/// undefined-shaped answer.
pub fn default_response(field: &FormField) -> Value {
    match field.kind {
        FieldType::Text | FieldType::Textarea | FieldType::Radio | FieldType::Select => {
            Value::String(String::new())
        }
        FieldType::Checkbox => Value::Array(Vec::new()),
        FieldType::Rating => Value::Null,
    }
}

/// Whether an answer counts as absent for this field. A rating of zero is
/// an unset rating, not a value.
pub fn is_empty_answer(field: &FormField, value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Number(num) if field.kind == FieldType::Rating => num.as_i64() == Some(0),
        _ => false,
    }
}

/// Validate one candidate answer against one field, the single-field gate.
pub fn validate_response(field: &FormField, value: &Value) -> ValidationReport {
    if is_empty_answer(field, value) {
        if field.required {
            return ValidationReport::from_errors(vec!["This field is required".to_string()]);
        }
        return ValidationReport::ok();
    }

    match validate_value(field, value) {
        Some(error) => ValidationReport::from_errors(vec![error.message]),
        None => ValidationReport::ok(),
    }
}

/// Validate a whole submission: shape errors, missing required answers, and
/// answer keys that match no field.
pub fn validate_responses(fields: &[FormField], responses: &Value) -> ResponseValidation {
    let responses_map = responses.as_object().cloned().unwrap_or_default();

    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for field in fields {
        match responses_map.get(&field.id) {
            None => {
                if field.required {
                    missing_required.push(field.id.clone());
                }
            }
            Some(value) if is_empty_answer(field, value) => {
                if field.required {
                    missing_required.push(field.id.clone());
                }
            }
            Some(value) => {
                if let Some(error) = validate_value(field, value) {
                    errors.push(error);
                }
            }
        }
    }

    let all_ids: BTreeSet<_> = fields.iter().map(|field| field.id.clone()).collect();
    let unknown_fields: Vec<String> = responses_map
        .keys()
        .filter(|key| !all_ids.contains(*key))
        .cloned()
        .collect();

    ResponseValidation {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

fn validate_value(field: &FormField, value: &Value) -> Option<ResponseError> {
    match field.kind {
        FieldType::Text | FieldType::Textarea => {
            if !value.is_string() {
                return Some(base_error(field, "Answer must be text", "type_mismatch"));
            }
            None
        }
        FieldType::Radio | FieldType::Select => {
            let Some(text) = value.as_str() else {
                return Some(base_error(field, "Answer must be text", "type_mismatch"));
            };
            if !field.option_values().iter().any(|option| option == text) {
                return Some(base_error(
                    field,
                    "Answer must be one of the listed options",
                    "unknown_option",
                ));
            }
            None
        }
        FieldType::Checkbox => validate_checkbox(field, value),
        FieldType::Rating => {
            let Some(rating) = value.as_i64() else {
                return Some(base_error(
                    field,
                    "Answer must be a whole number",
                    "type_mismatch",
                ));
            };
            let max_rating = i64::from(field.max_rating_or_default());
            if !(1..=max_rating).contains(&rating) {
                return Some(base_error(
                    field,
                    &format!("Rating must be between 1 and {}", max_rating),
                    "out_of_range",
                ));
            }
            None
        }
    }
}

fn validate_checkbox(field: &FormField, value: &Value) -> Option<ResponseError> {
    let Some(items) = value.as_array() else {
        return Some(base_error(
            field,
            "Answer must be a list of selected options",
            "type_mismatch",
        ));
    };

    let mut seen = BTreeSet::new();
    for item in items {
        let Some(text) = item.as_str() else {
            return Some(base_error(
                field,
                "Selections must be text",
                "type_mismatch",
            ));
        };
        if !field.option_values().iter().any(|option| option == text) {
            return Some(base_error(
                field,
                &format!("Selection '{}' is not one of the listed options", text),
                "unknown_option",
            ));
        }
        if !seen.insert(text) {
            return Some(base_error(
                field,
                &format!("Selection '{}' is repeated", text),
                "duplicate_option",
            ));
        }
    }
    None
}

fn base_error(field: &FormField, message: &str, code: &str) -> ResponseError {
    ResponseError {
        field_id: field.id.clone(),
        path: format!("/{}", field.id),
        message: message.to_string(),
        code: code.to_string(),
    }
}

/// Responses object pre-filled with each field's empty default.
pub fn empty_responses(fields: &[FormField]) -> Value {
    let mut map = serde_json::Map::new();
    for field in fields {
        map.insert(field.id.clone(), default_response(field));
    }
    Value::Object(map)
}
