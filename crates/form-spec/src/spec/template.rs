use std::fmt;

use crate::spec::field::{DEFAULT_MAX_RATING, FieldId, FieldPatch, FieldType, FormField};

/// Catalog grouping used by builder palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCategory {
    Input,
    Choice,
    Scale,
}

impl TemplateCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateCategory::Input => "input",
            TemplateCategory::Choice => "choice",
            TemplateCategory::Scale => "scale",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static default configuration for one field type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: FieldType,
    pub default_config: FieldPatch,
    pub icon: &'static str,
    pub category: TemplateCategory,
}

impl FieldTemplate {
    /// New field seeded from this template's defaults.
    pub fn instantiate(&self, id: impl Into<FieldId>) -> FormField {
        let mut field = FormField::blank(id, self.kind);
        field.apply(&self.default_config);
        field
    }
}

fn default_options() -> Vec<String> {
    vec!["Option 1".to_string(), "Option 2".to_string()]
}

/// The six built-in field templates, in palette order.
pub fn templates() -> Vec<FieldTemplate> {
    vec![
        FieldTemplate {
            id: "text",
            name: "Text",
            kind: FieldType::Text,
            default_config: FieldPatch {
                label: Some("Text Field".into()),
                placeholder: Some("Enter text...".into()),
                ..FieldPatch::default()
            },
            icon: "type",
            category: TemplateCategory::Input,
        },
        FieldTemplate {
            id: "textarea",
            name: "Long Text",
            kind: FieldType::Textarea,
            default_config: FieldPatch {
                label: Some("Long Text Field".into()),
                placeholder: Some("Enter detailed text...".into()),
                ..FieldPatch::default()
            },
            icon: "align-left",
            category: TemplateCategory::Input,
        },
        FieldTemplate {
            id: "radio",
            name: "Single Choice",
            kind: FieldType::Radio,
            default_config: FieldPatch {
                label: Some("Single Choice Field".into()),
                options: Some(default_options()),
                ..FieldPatch::default()
            },
            icon: "circle-dot",
            category: TemplateCategory::Choice,
        },
        FieldTemplate {
            id: "checkbox",
            name: "Multiple Choice",
            kind: FieldType::Checkbox,
            default_config: FieldPatch {
                label: Some("Multiple Choice Field".into()),
                options: Some(default_options()),
                ..FieldPatch::default()
            },
            icon: "check-square",
            category: TemplateCategory::Choice,
        },
        FieldTemplate {
            id: "select",
            name: "Dropdown",
            kind: FieldType::Select,
            default_config: FieldPatch {
                label: Some("Dropdown Field".into()),
                options: Some(default_options()),
                ..FieldPatch::default()
            },
            icon: "chevron-down",
            category: TemplateCategory::Choice,
        },
        FieldTemplate {
            id: "rating",
            name: "Rating",
            kind: FieldType::Rating,
            default_config: FieldPatch {
                label: Some("Rating Field".into()),
                max_rating: Some(DEFAULT_MAX_RATING),
                ..FieldPatch::default()
            },
            icon: "star",
            category: TemplateCategory::Scale,
        },
    ]
}

/// Look up one template by its catalog id.
pub fn template(id: &str) -> Option<FieldTemplate> {
    templates().into_iter().find(|entry| entry.id == id)
}
