#![allow(missing_docs)]

pub mod builder;
pub mod editor;
pub mod examples;
pub mod render;
pub mod response;
pub mod response_schema;
pub mod schema;
pub mod spec;
pub mod validate;

pub use builder::FormBuilder;
pub use editor::FieldEditor;
pub use examples::generate as example_responses;
pub use render::{
    RenderField, RenderPayload, RenderProgress, RenderStatus, build_render_payload,
    render_json_ui, render_text,
};
pub use response::{
    ResponseError, ResponseMeta, ResponseSet, ResponseValidation, default_response,
    empty_responses, is_empty_answer, validate_response, validate_responses,
};
pub use response_schema::generate as response_schema;
pub use schema::{
    FormSchema, SCHEMA_VERSION, SchemaError, SchemaMetadata, export_json, export_schema,
    import_schema,
};
pub use spec::{FieldId, FieldPatch, FieldTemplate, FieldType, FormField, template, templates};
pub use validate::{ValidationReport, validate_field, validate_form};
