use serde_json::{Map, Value, json};

use crate::spec::{FieldType, FormField};

/// Draft-07 JSON Schema describing a valid response object for the given
/// field sequence.
pub fn generate(fields: &[FormField]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in fields {
        properties.insert(field.id.clone(), field_schema(field));
        if field.required {
            required.push(Value::String(field.id.clone()));
        }
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn field_schema(field: &FormField) -> Value {
    let mut schema = match field.kind {
        FieldType::Text | FieldType::Textarea => json!({ "type": "string" }),
        FieldType::Radio | FieldType::Select => json!({
            "type": "string",
            "enum": field.option_values(),
        }),
        FieldType::Checkbox => json!({
            "type": "array",
            "items": { "type": "string", "enum": field.option_values() },
            "uniqueItems": true,
        }),
        FieldType::Rating => json!({
            "type": "integer",
            "minimum": 1,
            "maximum": field.max_rating_or_default(),
        }),
    };

    if let Some(object) = schema.as_object_mut() {
        object.insert("title".into(), Value::String(field.label.clone()));
        if let Some(description) = &field.description {
            object.insert("description".into(), Value::String(description.clone()));
        }
    }
    schema
}
