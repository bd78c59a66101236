use serde_json::{Map, Value};

use crate::response::{default_response, is_empty_answer};
use crate::response_schema;
use crate::spec::{FieldId, FieldType, FormField};

/// Status labels returned by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// At least one required field still lacks an answer.
    NeedInput,
    /// Every required field is answered; the form is submittable.
    Complete,
}

impl RenderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderStatus::NeedInput => "need_input",
            RenderStatus::Complete => "complete",
        }
    }
}

/// Progress counters exposed to renderers.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub answered: usize,
    pub total: usize,
}

/// Describes a single field for render outputs. `control` is the one
/// authoritative type-to-control mapping; embedding renderers consume it
/// rather than inventing their own.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub id: FieldId,
    pub label: String,
    pub description: Option<String>,
    pub kind: FieldType,
    pub control: &'static str,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Option<Vec<String>>,
    pub max_rating: Option<u8>,
    pub value: Value,
    pub answered: bool,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct RenderPayload {
    pub status: RenderStatus,
    pub next_field_id: Option<FieldId>,
    pub progress: RenderProgress,
    pub fields: Vec<RenderField>,
    pub schema: Value,
}

fn control_label(kind: FieldType) -> &'static str {
    match kind {
        FieldType::Text => "text-input",
        FieldType::Textarea => "textarea",
        FieldType::Radio => "radio-group",
        FieldType::Checkbox => "checkbox-group",
        FieldType::Select => "select",
        FieldType::Rating => "star-rating",
    }
}

/// Build the renderer payload from the field sequence and current answers.
pub fn build_render_payload(fields: &[FormField], responses: &Value) -> RenderPayload {
    let responses_map = responses.as_object().cloned().unwrap_or_default();

    let render_fields = fields
        .iter()
        .map(|field| {
            let current = responses_map.get(&field.id);
            let answered = current
                .map(|value| !is_empty_answer(field, value))
                .unwrap_or(false);
            RenderField {
                id: field.id.clone(),
                label: field.label.clone(),
                description: field.description.clone(),
                kind: field.kind,
                control: control_label(field.kind),
                required: field.required,
                placeholder: field.placeholder.clone(),
                options: field.options.clone(),
                max_rating: field.max_rating,
                value: current.cloned().unwrap_or_else(|| default_response(field)),
                answered,
            }
        })
        .collect::<Vec<_>>();

    let answered = render_fields.iter().filter(|field| field.answered).count();
    let total = render_fields.len();

    let next_field_id = render_fields
        .iter()
        .find(|field| field.required && !field.answered)
        .map(|field| field.id.clone());

    let status = if next_field_id.is_some() {
        RenderStatus::NeedInput
    } else {
        RenderStatus::Complete
    };

    RenderPayload {
        status,
        next_field_id,
        progress: RenderProgress { answered, total },
        fields: render_fields,
        schema: response_schema::generate(fields),
    }
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &RenderPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(field.id.clone()));
            map.insert("label".into(), Value::String(field.label.clone()));
            map.insert(
                "description".into(),
                field
                    .description
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            map.insert("type".into(), Value::String(field.kind.as_str().into()));
            map.insert("control".into(), Value::String(field.control.into()));
            map.insert("required".into(), Value::Bool(field.required));
            if let Some(placeholder) = &field.placeholder {
                map.insert("placeholder".into(), Value::String(placeholder.clone()));
            }
            if let Some(options) = &field.options {
                map.insert(
                    "options".into(),
                    Value::Array(
                        options
                            .iter()
                            .map(|option| Value::String(option.clone()))
                            .collect(),
                    ),
                );
            }
            if let Some(max_rating) = field.max_rating {
                map.insert("maxRating".into(), Value::Number(max_rating.into()));
            }
            map.insert("value".into(), field.value.clone());
            map.insert("answered".into(), Value::Bool(field.answered));
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "status": payload.status.as_str(),
        "next_field_id": payload.next_field_id,
        "progress": {
            "answered": payload.progress.answered,
            "total": payload.progress.total,
        },
        "fields": fields,
        "schema": payload.schema,
    })
}

/// Render the payload as human-friendly text, the read-only preview an end
/// user would see.
pub fn render_text(payload: &RenderPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Status: {} ({}/{})",
        payload.status.as_str(),
        payload.progress.answered,
        payload.progress.total
    ));

    if let Some(next_field) = &payload.next_field_id {
        lines.push(format!("Next field: {}", next_field));
    } else {
        lines.push("All required fields are answered.".to_string());
    }

    lines.push("Fields:".to_string());
    for field in &payload.fields {
        let mut entry = format!(" - {} ({})", field.label, field.control);
        if field.required {
            entry.push_str(" [required]");
        }
        if field.answered {
            entry.push_str(&format!(" = {}", value_to_display(&field.value)));
        }
        lines.push(entry);
        if let Some(description) = &field.description {
            lines.push(format!("     {}", description));
        }
        if let Some(options) = &field.options {
            lines.push(format!("     choices: {}", options.join(", ")));
        }
        if let Some(max_rating) = field.max_rating {
            lines.push(format!("     scale: 1-{}", max_rating));
        }
    }

    lines.join("\n")
}

fn value_to_display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(num) => num.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_display)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
