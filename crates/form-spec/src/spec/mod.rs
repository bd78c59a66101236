pub mod field;
pub mod template;

pub use field::{DEFAULT_MAX_RATING, FieldId, FieldPatch, FieldType, FormField};
pub use template::{FieldTemplate, TemplateCategory, template, templates};
