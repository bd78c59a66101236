pub mod builder;

mod presenter;

use builder::{
    CliFieldType, FormInput, GeneratedBundle, GenerationInput, build_bundle, bundle_from_fields,
    sanitize_file_name, write_bundle,
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use form_spec::{
    FieldEditor, FormBuilder, ResponseMeta, ResponseSet, ResponseValidation, SCHEMA_VERSION,
    build_render_payload, empty_responses, import_schema, render_json_ui, render_text,
    validate_form, validate_response, validate_responses,
};
use form_spec::spec::{FieldType, FormField};
use presenter::{AnswerParseError, FillPresenter, PromptContext, Verbosity};
use serde_json::{Map, Value, json};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Feedback form builder CLI",
    long_about = "Builds dynamic feedback-form schemas, previews them, and validates submitted responses"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderMode {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive form builder that creates a bundle of derived artifacts.
    New {
        /// Root directory where the generated bundle will be emitted (defaults to FEEDBACK_FORMS_OUTPUT_DIR or current working directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Overwrite existing bundle if present.
        #[arg(long)]
        force: bool,
        /// Show internal bundle data for debugging.
        #[arg(long)]
        verbose: bool,
    },
    /// Non-interactive generator that consumes a JSON description and emits the bundle.
    Generate {
        /// JSON file describing the form metadata + fields.
        #[arg(long, value_name = "INPUT")]
        input: PathBuf,
        /// Root directory where the generated bundle will be emitted.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Overwrite existing bundle if present.
        #[arg(long)]
        force: bool,
        /// Show internal bundle data for debugging.
        #[arg(long)]
        verbose: bool,
    },
    /// Validate submitted responses against an exported form schema.
    Validate {
        /// Path to the form schema JSON.
        #[arg(long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// Path to the responses JSON file.
        #[arg(long, value_name = "RESPONSES")]
        responses: PathBuf,
    },
    /// Fill a form interactively, validating each answer as it is entered.
    Fill {
        /// Path to the form schema JSON.
        #[arg(long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// Write the collected responses to this file.
        #[arg(long, value_name = "OUT")]
        out: Option<PathBuf>,
        /// Show verbose output (choice lists, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
        /// Also emit response JSON on completion.
        #[arg(long)]
        responses_json: bool,
    },
    /// Render a form the way an end user would see it.
    Preview {
        /// Path to the form schema JSON.
        #[arg(long, value_name = "SCHEMA")]
        schema: PathBuf,
        /// Optional JSON file containing current responses.
        #[arg(long, value_name = "RESPONSES")]
        responses: Option<PathBuf>,
        /// Render output mode.
        #[arg(long, value_enum, default_value_t = RenderMode::Text)]
        format: RenderMode,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::New {
            out,
            force,
            verbose,
        } => run_new(out, force, verbose),
        Command::Generate {
            input,
            out,
            force,
            verbose,
        } => run_generate(input, out, force, verbose),
        Command::Validate { schema, responses } => run_validate(schema, responses),
        Command::Fill {
            schema,
            out,
            verbose,
            responses_json,
        } => run_fill(schema, out, verbose, responses_json),
        Command::Preview {
            schema,
            responses,
            format,
        } => run_preview(schema, responses, format),
    }
}

fn run_new(out_dir: Option<PathBuf>, force: bool, verbose: bool) -> CliResult<()> {
    println!("Interactive feedback form builder");
    let title = prompt_non_empty(&mark_required("Form title"), None)?;
    let description = prompt_optional("Description (optional)")?;
    let dir_default = sanitize_file_name(&title.to_lowercase());
    let dir_name = prompt_non_empty(&mark_required("Output directory name"), Some(&dir_default))?;
    let out_root = resolve_output_root(out_dir)?;

    let mut builder = FormBuilder::new();
    loop {
        let raw = prompt_optional(
            "Field type (text|textarea|radio|checkbox|select|rating, blank to finish)",
        )?;
        let Some(raw) = raw else { break };
        let kind = match CliFieldType::from_str(&raw) {
            Ok(kind) => kind,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        let (id, default_label) = match builder.add_field(kind.template_id()) {
            Some(field) => (field.id.clone(), field.label.clone()),
            None => continue,
        };
        edit_field(&mut builder, &id, kind, &default_label)?;
        println!("Added field '{}' ({} total).", id, builder.len());
    }

    if builder.is_empty() {
        return Err("at least one field is required".into());
    }

    adjust_fields(&mut builder)?;

    let fields = builder.fields();
    let report = validate_form(&fields);
    if !report.valid {
        eprintln!("Form is not complete:");
        for error in &report.errors {
            eprintln!("  {}", error);
        }
        return Err("form validation failed".into());
    }

    if prompt_bool("Preview the form?", false)? {
        builder.toggle_preview();
        let payload = build_render_payload(&fields, &empty_responses(&fields));
        println!("{}", render_text(&payload));
        builder.toggle_preview();
    }

    let input = GenerationInput {
        dir_name,
        form: FormInput { title, description },
        fields: Vec::new(),
    };

    let bundle_dir = out_root.join(&input.dir_name);
    ensure_allowed_root(&bundle_dir)?;
    if bundle_dir.exists() {
        if force {
            fs::remove_dir_all(&bundle_dir)?;
        } else {
            return Err(format!(
                "bundle {} already exists; rerun with --force to overwrite",
                bundle_dir.display()
            )
            .into());
        }
    }

    let bundle = bundle_from_fields(fields);
    let bundle_dir = write_bundle(&bundle, &input, &out_root)?;
    println!("Generated form bundle at {}", bundle_dir.display());
    if verbose {
        println!("Detailed bundle state:");
        dump_bundle_debug(&bundle)?;
    }
    Ok(())
}

fn edit_field(
    builder: &mut FormBuilder,
    id: &str,
    kind: CliFieldType,
    default_label: &str,
) -> CliResult<()> {
    loop {
        let Some(editor) = FieldEditor::open(builder, id) else {
            return Ok(());
        };

        let label = prompt_non_empty(&mark_required("Field label"), Some(default_label))?;
        let mut editor = editor.with_label(label);
        editor = editor.with_required(prompt_bool("Required?", false)?);

        match kind {
            CliFieldType::Radio | CliFieldType::Checkbox | CliFieldType::Select => {
                editor = editor.with_options(prompt_options()?);
            }
            CliFieldType::Rating => {
                if let Some(max_rating) = prompt_optional_u8("Max rating (2-10, blank for 5)")? {
                    editor = editor.with_max_rating(max_rating);
                }
            }
            CliFieldType::Text | CliFieldType::Textarea => {
                if let Some(placeholder) = prompt_optional("Placeholder (optional)")? {
                    editor = editor.with_placeholder(placeholder);
                }
            }
        }
        if let Some(description) = prompt_optional("Help text (optional)")? {
            editor = editor.with_description(description);
        }

        let report = editor.commit(builder);
        if report.valid {
            return Ok(());
        }
        println!("Invalid field:");
        for error in &report.errors {
            println!("  {}", error);
        }
        // the draft is discarded; the committed defaults stay intact
    }
}

fn adjust_fields(builder: &mut FormBuilder) -> CliResult<()> {
    loop {
        let action = prompt_line("Adjust fields (list/duplicate/remove/reorder/done)", Some("done"))?;
        match action.trim().to_lowercase().as_str() {
            "" | "done" => return Ok(()),
            "list" => list_fields(builder),
            "duplicate" => {
                let id = prompt_non_empty("Field id to duplicate", None)?;
                match builder.duplicate_field(&id) {
                    Some(copy) => println!("Added '{}'.", copy.id),
                    None => println!("No field with id '{}'.", id),
                }
            }
            "remove" => {
                let id = prompt_non_empty("Field id to remove", None)?;
                builder.remove_field(&id);
                println!("{} field(s) remain.", builder.len());
            }
            "reorder" => {
                let from = prompt_usize("Move from position (1-based)")?;
                let to = prompt_usize("Move to position (1-based)")?;
                if from == 0 || to == 0 {
                    println!("Positions are 1-based.");
                    continue;
                }
                builder.reorder_fields(from - 1, to - 1);
                list_fields(builder);
            }
            other => println!("Unknown action '{}'.", other),
        }
    }
}

fn list_fields(builder: &FormBuilder) {
    for (index, field) in builder.fields().iter().enumerate() {
        let mut entry = format!(
            "{}. {} [{}] ({})",
            index + 1,
            field.label,
            field.id,
            field.kind
        );
        if field.required {
            entry.push_str(" *");
        }
        println!("{}", entry);
    }
}

fn run_generate(
    input_path: PathBuf,
    out_dir: Option<PathBuf>,
    force: bool,
    verbose: bool,
) -> CliResult<()> {
    let contents = fs::read_to_string(&input_path)?;
    let input: GenerationInput = serde_json::from_str(&contents)?;
    let out_root = resolve_output_root(out_dir)?;
    let bundle_dir = out_root.join(&input.dir_name);
    ensure_allowed_root(&bundle_dir)?;
    if bundle_dir.exists() {
        if force {
            fs::remove_dir_all(&bundle_dir)?;
        } else {
            return Err(format!(
                "bundle {} already exists; rerun with --force to overwrite",
                bundle_dir.display()
            )
            .into());
        }
    }

    let bundle = build_bundle(&input)?;
    let bundle_dir = write_bundle(&bundle, &input, &out_root)?;
    println!("Generated form bundle at {}", bundle_dir.display());
    if verbose {
        println!("Detailed bundle state:");
        dump_bundle_debug(&bundle)?;
    }
    Ok(())
}

fn dump_bundle_debug(bundle: &GeneratedBundle) -> CliResult<()> {
    println!("Form schema:");
    println!("{}", serde_json::to_string_pretty(&bundle.schema)?);
    println!("Response schema:");
    println!("{}", serde_json::to_string_pretty(&bundle.response_schema)?);
    println!("Example responses:");
    println!("{}", serde_json::to_string_pretty(&bundle.examples)?);
    Ok(())
}

fn run_validate(schema_path: PathBuf, responses_path: PathBuf) -> CliResult<()> {
    let schema_json = fs::read_to_string(schema_path)?;
    let fields = import_schema(&schema_json)?;
    let responses_json = fs::read_to_string(responses_path)?;
    let responses: Value = serde_json::from_str(&responses_json)?;

    let result = validate_responses(&fields, &responses);
    println!(
        "Validation result: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if result.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_validation(result: &ResponseValidation) {
    if !result.errors.is_empty() {
        println!("Errors:");
        for error in &result.errors {
            println!("  {} - {}", error.path, error.message);
        }
    }
    if !result.missing_required.is_empty() {
        println!(
            "Missing required answers: {}",
            result.missing_required.join(", ")
        );
    }
    if !result.unknown_fields.is_empty() {
        println!("Unknown answer fields: {}", result.unknown_fields.join(", "));
    }
}

fn run_fill(
    schema_path: PathBuf,
    out_path: Option<PathBuf>,
    verbose: bool,
    responses_json: bool,
) -> CliResult<()> {
    let schema_json = fs::read_to_string(&schema_path)?;
    let fields = import_schema(&schema_json)?;
    if fields.is_empty() {
        return Err("form has no fields to fill".into());
    }

    let mut presenter = FillPresenter::new(Verbosity::from_verbose(verbose), responses_json);
    presenter.show_header(fields.len());

    let total = fields.len();
    let mut responses = Map::new();
    for (index, field) in fields.iter().enumerate() {
        let prompt = PromptContext::new(field, index + 1, total);
        let value = prompt_field(&prompt, field, &presenter)?;
        if !value.is_null() {
            responses.insert(field.id.clone(), value);
        }
    }

    let responses = Value::Object(responses);
    let result = validate_responses(&fields, &responses);
    if !result.valid {
        describe_validation(&result);
        return Err("responses failed validation".into());
    }

    let response_set = ResponseSet {
        schema_version: SCHEMA_VERSION.to_string(),
        responses,
        meta: Some(ResponseMeta {
            submitted_at: Utc::now(),
        }),
    };
    presenter.show_completion(&response_set);

    if let Some(out) = out_path {
        fs::write(&out, response_set.to_json_pretty()?)?;
        println!("Responses written to {}", out.display());
    }
    Ok(())
}

fn prompt_field(
    prompt: &PromptContext,
    field: &FormField,
    presenter: &FillPresenter,
) -> CliResult<Value> {
    loop {
        presenter.show_prompt(prompt);
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return Err("fill aborted by user".into());
        }

        match parse_answer(field, trimmed) {
            Ok(value) => {
                let report = validate_response(field, &value);
                if report.valid {
                    return Ok(value);
                }
                for error in &report.errors {
                    eprintln!("Invalid answer: {}", error);
                }
            }
            Err(err) => presenter.show_parse_error(&err),
        }
    }
}

fn parse_answer(field: &FormField, raw: &str) -> Result<Value, AnswerParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        if !field.required {
            return Ok(Value::Null);
        }
        return Err(AnswerParseError::new("This field requires an answer.", None));
    }

    match field.kind {
        FieldType::Text | FieldType::Textarea => Ok(Value::String(trimmed.to_string())),
        FieldType::Radio | FieldType::Select => parse_choice(field, trimmed),
        FieldType::Checkbox => parse_selections(field, trimmed),
        FieldType::Rating => parse_rating(field, trimmed),
    }
}

fn parse_choice(field: &FormField, raw: &str) -> Result<Value, AnswerParseError> {
    let options = field.option_values();
    if let Some(option) = options.iter().find(|option| option.eq_ignore_ascii_case(raw)) {
        Ok(Value::String(option.clone()))
    } else {
        Err(AnswerParseError::new(
            format!("Choose one of: {}.", options.join(", ")),
            Some(format!("allowed values: {}", options.join(", "))),
        ))
    }
}

fn parse_selections(field: &FormField, raw: &str) -> Result<Value, AnswerParseError> {
    let options = field.option_values();
    let mut picked: Vec<Value> = Vec::new();

    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let Some(option) = options.iter().find(|option| option.eq_ignore_ascii_case(part))
        else {
            return Err(AnswerParseError::new(
                format!(
                    "'{}' is not an option. Choose from: {}.",
                    part,
                    options.join(", ")
                ),
                Some(format!("allowed values: {}", options.join(", "))),
            ));
        };
        if picked.iter().any(|entry| entry.as_str() == Some(option.as_str())) {
            return Err(AnswerParseError::new(
                format!("'{}' is selected twice.", option),
                None,
            ));
        }
        picked.push(Value::String(option.clone()));
    }

    if picked.is_empty() {
        if field.required {
            return Err(AnswerParseError::new("Select at least one option.", None));
        }
        return Ok(Value::Null);
    }
    Ok(Value::Array(picked))
}

fn parse_rating(field: &FormField, raw: &str) -> Result<Value, AnswerParseError> {
    raw.parse::<i64>()
        .map(|rating| Value::Number(rating.into()))
        .map_err(|_| {
            AnswerParseError::new(
                "Please enter a whole number.",
                Some(format!(
                    "expected integer between 1 and {}",
                    field.max_rating_or_default()
                )),
            )
        })
}

fn run_preview(
    schema_path: PathBuf,
    responses_path: Option<PathBuf>,
    format: RenderMode,
) -> CliResult<()> {
    let schema_json = fs::read_to_string(&schema_path)?;
    let fields = import_schema(&schema_json)?;

    let responses = if let Some(path) = responses_path {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)?
    } else {
        json!({})
    };

    let payload = build_render_payload(&fields, &responses);
    match format {
        RenderMode::Text => println!("{}", render_text(&payload)),
        RenderMode::Json => println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?),
    }
    Ok(())
}

fn resolve_output_root(out: Option<PathBuf>) -> CliResult<PathBuf> {
    let candidate = match out {
        Some(path) => path,
        None => env::var_os("FEEDBACK_FORMS_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if candidate.as_os_str().is_empty() {
        return Err("output directory cannot be empty".into());
    }
    ensure_allowed_root(&candidate)?;
    Ok(candidate)
}

fn ensure_allowed_root(target: &Path) -> CliResult<()> {
    let target = canonicalize_target(target)?;
    let roots = allowed_roots()?;
    if roots.iter().any(|root| target.starts_with(root)) || path_is_writable(&target) {
        Ok(())
    } else {
        Err(format!(
            "path '{}' is outside allowed roots {:?}",
            target.display(),
            roots
        )
        .into())
    }
}

fn allowed_roots() -> CliResult<Vec<PathBuf>> {
    let roots = env::var("FEEDBACK_FORMS_ALLOWED_ROOTS")
        .ok()
        .map(|value| {
            value
                .split(':')
                .filter_map(|segment| {
                    let trimmed = segment.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(PathBuf::from(trimmed))
                    }
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let mut canonical_roots = Vec::new();
    for root in roots {
        if let Ok(canonical) = root.canonicalize() {
            canonical_roots.push(canonical);
        } else {
            canonical_roots.push(root);
        }
    }

    if canonical_roots.is_empty() {
        let cwd = env::current_dir()?;
        canonical_roots.push(cwd.canonicalize().unwrap_or(cwd));
    }

    Ok(canonical_roots)
}

fn path_is_writable(target: &Path) -> bool {
    let mut candidate = Some(target);
    while let Some(path) = candidate {
        if path.exists() {
            if let Ok(metadata) = fs::metadata(path) {
                return !metadata.permissions().readonly();
            }
            return false;
        }
        candidate = path.parent();
    }
    false
}

fn canonicalize_target(path: &Path) -> CliResult<PathBuf> {
    if path.exists() {
        return Ok(path.canonicalize()?);
    }

    if let Some(parent) = path.parent()
        && let Ok(parent_canon) = parent.canonicalize()
    {
        if let Some(file_name) = path.file_name() {
            return Ok(parent_canon.join(file_name));
        } else {
            return Ok(parent_canon);
        }
    }

    let cwd = env::current_dir()?;
    Ok(cwd.join(path))
}

fn prompt_line(prompt: &str, default: Option<&str>) -> CliResult<String> {
    if let Some(default_value) = default {
        print!("{} [{}]: ", prompt, default_value);
    } else {
        print!("{}: ", prompt);
    }
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        if let Some(default_value) = default {
            Ok(default_value.to_string())
        } else {
            Ok(String::new())
        }
    } else {
        Ok(trimmed.to_string())
    }
}

fn prompt_optional(prompt: &str) -> CliResult<Option<String>> {
    let value = prompt_line(prompt, None)?;
    if value.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

fn prompt_non_empty(prompt: &str, default: Option<&str>) -> CliResult<String> {
    loop {
        let value = prompt_line(prompt, default)?;
        if !value.trim().is_empty() {
            return Ok(value);
        }
        println!("Value cannot be empty.");
    }
}

fn prompt_bool(prompt: &str, default: bool) -> CliResult<bool> {
    let prompt_text = format!("{} (y/n)", prompt.trim());
    let default_hint = if default { "Y" } else { "N" };
    loop {
        let line = prompt_line(&prompt_text, Some(default_hint))?;
        match line.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => {
                println!("Invalid answer '{}'. Expected yes or no.", other);
            }
        }
    }
}

fn prompt_usize(prompt: &str) -> CliResult<usize> {
    loop {
        let raw = prompt_line(prompt, None)?;
        match raw.trim().parse::<usize>() {
            Ok(value) => return Ok(value),
            Err(_) => {
                println!("Please enter a whole number.");
            }
        }
    }
}

fn prompt_optional_u8(prompt: &str) -> CliResult<Option<u8>> {
    loop {
        let raw = prompt_line(prompt, None)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<u8>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => {
                println!("Please enter a whole number or leave blank.");
            }
        }
    }
}

fn prompt_options() -> CliResult<Vec<String>> {
    loop {
        let raw = prompt_line("Comma separated options (e.g. Yes,No,Maybe)", None)?;
        let normalized = raw
            .split(',')
            .map(str::trim)
            .filter(|option| !option.is_empty())
            .map(|option| option.to_string())
            .collect::<Vec<_>>();
        if normalized.len() < 2 {
            println!("Provide at least 2 options for choice fields.");
            continue;
        }
        return Ok(normalized);
    }
}

fn mark_required(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.to_lowercase().contains("required") {
        trimmed.to_string()
    } else {
        format!("{} (required)", trimmed)
    }
}
