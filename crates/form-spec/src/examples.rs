use serde_json::{Map, Value};

use crate::spec::{FieldType, FormField};

/// Plausible sample responses for a field sequence, used when writing
/// bundle fixtures and documentation.
pub fn generate(fields: &[FormField]) -> Value {
    let mut map = Map::new();
    for field in fields {
        map.insert(field.id.clone(), example_value(field));
    }
    Value::Object(map)
}

fn example_value(field: &FormField) -> Value {
    match field.kind {
        FieldType::Text | FieldType::Textarea => {
            Value::String(format!("example-{}", field.id))
        }
        FieldType::Radio | FieldType::Select => first_option(field),
        FieldType::Checkbox => match first_option(field) {
            Value::String(option) => Value::Array(vec![Value::String(option)]),
            _ => Value::Array(Vec::new()),
        },
        FieldType::Rating => {
            let midpoint = (1 + i64::from(field.max_rating_or_default())) / 2;
            Value::Number(midpoint.into())
        }
    }
}

fn first_option(field: &FormField) -> Value {
    field
        .option_values()
        .first()
        .cloned()
        .map(Value::String)
        .unwrap_or(Value::Null)
}
