use crate::builder::FormBuilder;
use crate::spec::{FieldId, FieldPatch, FormField};
use crate::validate::{ValidationReport, validate_field};

/// Edit buffer over one committed field.
///
/// The editor works on a local copy; committed state stays untouched until
/// `commit` passes field-level validation and merges the draft back through
/// `FormBuilder::update_field`. Dropping the editor cancels the edit.
#[derive(Debug, Clone)]
pub struct FieldEditor {
    field_id: FieldId,
    draft: FormField,
}

impl FieldEditor {
    /// Open an editor on the field with that id. Unknown ids yield `None`.
    pub fn open(builder: &FormBuilder, id: &str) -> Option<Self> {
        let draft = builder.field(id)?.clone();
        Some(Self {
            field_id: draft.id.clone(),
            draft,
        })
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn draft(&self) -> &FormField {
        &self.draft
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.draft.label = label.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.draft.required = required;
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.draft.options = Some(options);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.draft.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.draft.description = Some(description.into());
        self
    }

    pub fn with_max_rating(mut self, max_rating: u8) -> Self {
        self.draft.max_rating = Some(max_rating);
        self
    }

    /// Run field-level validation against the draft.
    pub fn validate(&self) -> ValidationReport {
        validate_field(&self.draft)
    }

    /// Merge the draft into the builder when it validates; an invalid draft
    /// commits nothing. Returns the validation report either way.
    pub fn commit(self, builder: &mut FormBuilder) -> ValidationReport {
        let report = self.validate();
        if report.valid {
            builder.update_field(&self.field_id, FieldPatch::from_field(&self.draft));
        }
        report
    }
}
