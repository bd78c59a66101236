use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use form_spec::{
    FieldPatch, FormBuilder, FormField, FormSchema, example_responses, export_schema,
    response_schema, validate_form,
};

/// Input shape describing what should be generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationInput {
    pub dir_name: String,
    pub form: FormInput,
    #[serde(default)]
    pub fields: Vec<FieldInput>,
}

/// Metadata describing the form; carried into the bundle README.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Field metadata collected from CLI interactions or JSON inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInput {
    #[serde(rename = "type")]
    pub kind: CliFieldType,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub max_rating: Option<u8>,
}

/// Supported field types for generation; mirror the catalog template ids.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CliFieldType {
    #[default]
    Text,
    Textarea,
    Radio,
    Checkbox,
    Select,
    Rating,
}

impl CliFieldType {
    pub fn template_id(self) -> &'static str {
        match self {
            CliFieldType::Text => "text",
            CliFieldType::Textarea => "textarea",
            CliFieldType::Radio => "radio",
            CliFieldType::Checkbox => "checkbox",
            CliFieldType::Select => "select",
            CliFieldType::Rating => "rating",
        }
    }
}

impl fmt::Display for CliFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_id())
    }
}

impl std::str::FromStr for CliFieldType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" => Ok(CliFieldType::Text),
            "textarea" | "longtext" | "long-text" => Ok(CliFieldType::Textarea),
            "radio" | "single" | "single-choice" => Ok(CliFieldType::Radio),
            "checkbox" | "multi" | "multiple-choice" => Ok(CliFieldType::Checkbox),
            "select" | "dropdown" => Ok(CliFieldType::Select),
            "rating" | "stars" => Ok(CliFieldType::Rating),
            _ => Err(format!("unknown field type '{}'", value)),
        }
    }
}

/// Generated bundle returned by the builder.
#[derive(Debug)]
pub struct GeneratedBundle {
    pub fields: Vec<FormField>,
    pub schema: FormSchema,
    pub response_schema: Value,
    pub examples: Value,
}

/// Derive every bundle artifact from a validated field sequence.
pub fn bundle_from_fields(fields: Vec<FormField>) -> GeneratedBundle {
    GeneratedBundle {
        schema: export_schema(&fields),
        response_schema: response_schema(&fields),
        examples: example_responses(&fields),
        fields,
    }
}

/// Build the full bundle from CLI inputs or JSON answers.
pub fn build_bundle(input: &GenerationInput) -> Result<GeneratedBundle, String> {
    validate_input(input)?;

    let mut builder = FormBuilder::new();
    for field in &input.fields {
        let Some(id) = builder
            .add_field(field.kind.template_id())
            .map(|added| added.id.clone())
        else {
            continue;
        };
        builder.update_field(
            &id,
            FieldPatch {
                label: field.label.clone(),
                required: Some(field.required),
                options: field.options.clone(),
                placeholder: field.placeholder.clone(),
                description: field.description.clone(),
                max_rating: field.max_rating,
            },
        );
    }

    let fields = builder.fields();
    let report = validate_form(&fields);
    if !report.valid {
        return Err(report.errors.join("; "));
    }

    Ok(bundle_from_fields(fields))
}

fn validate_input(input: &GenerationInput) -> Result<(), String> {
    if input.dir_name.trim().is_empty() {
        return Err("dir_name must be provided".into());
    }
    if input.form.title.trim().is_empty() {
        return Err("form.title is required".into());
    }
    if input.fields.is_empty() {
        return Err("at least one field must be defined".into());
    }
    Ok(())
}

/// Serialize the bundle to disk.
pub fn write_bundle(
    bundle: &GeneratedBundle,
    input: &GenerationInput,
    out_root: &Path,
) -> io::Result<PathBuf> {
    let bundle_dir = out_root.join(&input.dir_name);
    let forms_dir = bundle_dir.join("forms");
    let schemas_dir = bundle_dir.join("schemas");
    let samples_dir = bundle_dir.join("samples");

    fs::create_dir_all(&forms_dir)?;
    fs::create_dir_all(&schemas_dir)?;
    fs::create_dir_all(&samples_dir)?;

    let base_name = sanitize_file_name(&input.dir_name);

    write_json(
        &forms_dir.join(format!("{}.form.json", base_name)),
        &bundle.schema,
    )?;
    write_json(
        &schemas_dir.join(format!("{}.responses.schema.json", base_name)),
        &bundle.response_schema,
    )?;
    write_json(
        &samples_dir.join(format!("{}.responses.example.json", base_name)),
        &bundle.examples,
    )?;

    let readme_path = bundle_dir.join("README.md");
    fs::write(readme_path, build_readme(bundle, input, &base_name))?;

    Ok(bundle_dir)
}

pub fn sanitize_file_name(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "form".into()
    } else {
        cleaned
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> io::Result<()> {
    let contents = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    fs::write(path, contents)
}

fn build_readme(bundle: &GeneratedBundle, input: &GenerationInput, base: &str) -> String {
    let description = input
        .form
        .description
        .as_deref()
        .unwrap_or("No description provided.");

    format!(
        "# {title}\n\n{description}\n\nFields: {count} ({required} required)\n\n## Files\n\n- `forms/{base}.form.json`\n- `schemas/{base}.responses.schema.json`\n- `samples/{base}.responses.example.json`\n\nValidate submitted responses with:\n\n```\nfeedback-forms validate --schema forms/{base}.form.json --responses samples/{base}.responses.example.json\n```\n",
        title = input.form.title,
        description = description,
        count = bundle.schema.metadata.field_count,
        required = bundle.schema.metadata.required_fields,
        base = base,
    )
}
