use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a field, unique within one form.
pub type FieldId = String;

/// Upper bound used when a rating field does not pin its own maximum.
pub const DEFAULT_MAX_RATING: u8 = 5;

/// Supported field data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text,
    Textarea,
    Radio,
    Checkbox,
    Select,
    Rating,
}

impl FieldType {
    /// Whether answers to this field come from a fixed option list.
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            FieldType::Radio | FieldType::Checkbox | FieldType::Select
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Textarea => "TEXTAREA",
            FieldType::Radio => "RADIO",
            FieldType::Checkbox => "CHECKBOX",
            FieldType::Select => "SELECT",
            FieldType::Rating => "RATING",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition of a single field inside a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: FieldId,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<u8>,
}

impl FormField {
    /// Blank field of the given type; templates and tests build on this.
    pub fn blank(id: impl Into<FieldId>, kind: FieldType) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            kind,
            required: false,
            options: None,
            placeholder: None,
            description: None,
            max_rating: None,
        }
    }

    /// Merge a partial update into this field. Absent patch entries leave
    /// the current value untouched.
    pub fn apply(&mut self, patch: &FieldPatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = &patch.options {
            self.options = Some(options.clone());
        }
        if let Some(placeholder) = &patch.placeholder {
            self.placeholder = Some(placeholder.clone());
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(max_rating) = patch.max_rating {
            self.max_rating = Some(max_rating);
        }
    }

    pub fn option_values(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    pub fn max_rating_or_default(&self) -> u8 {
        self.max_rating.unwrap_or(DEFAULT_MAX_RATING)
    }
}

/// Partial `FormField`: seeds new fields from templates and carries builder
/// updates. The field's id and type are fixed at creation and cannot be
/// patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub max_rating: Option<u8>,
}

impl FieldPatch {
    /// Full patch mirroring every patchable attribute of `field`.
    pub fn from_field(field: &FormField) -> Self {
        Self {
            label: Some(field.label.clone()),
            required: Some(field.required),
            options: field.options.clone(),
            placeholder: field.placeholder.clone(),
            description: field.description.clone(),
            max_rating: field.max_rating,
        }
    }
}
