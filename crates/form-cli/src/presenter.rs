use std::fmt::Write;

use form_spec::ResponseSet;
use form_spec::spec::{FieldType, FormField};

/// Controls which bits of state the fill wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: field prompts only.
    Clean,
    /// Verbose output: choice lists, parse expectations.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Everything a prompt line needs to know about one field.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub required: bool,
    pub hint: Option<String>,
    pub description: Option<String>,
    pub choices: Vec<String>,
}

impl PromptContext {
    pub fn new(field: &FormField, index: usize, total: usize) -> Self {
        let hint = match field.kind {
            FieldType::Radio | FieldType::Select => {
                Some(format!("({})", field.option_values().join("/")))
            }
            FieldType::Checkbox => Some("(comma separated)".to_string()),
            FieldType::Rating => Some(format!("(1-{})", field.max_rating_or_default())),
            FieldType::Text | FieldType::Textarea => field
                .placeholder
                .clone()
                .map(|placeholder| format!("({})", placeholder)),
        };

        Self {
            index,
            total,
            label: field.label.clone(),
            required: field.required,
            hint,
            description: field.description.clone(),
            choices: field.option_values().to_vec(),
        }
    }
}

/// Failure turning raw terminal input into a typed answer.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

/// Prints prompts and progress while a form is being filled in.
pub struct FillPresenter {
    verbosity: Verbosity,
    header_printed: bool,
    show_responses_json: bool,
}

impl FillPresenter {
    pub fn new(verbosity: Verbosity, show_responses_json: bool) -> Self {
        Self {
            verbosity,
            header_printed: false,
            show_responses_json,
        }
    }

    pub fn show_header(&mut self, total: usize) {
        if self.header_printed {
            return;
        }
        println!("Filling form ({} fields). Type 'exit' to abort.", total);
        self.header_printed = true;
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = format!("{}/{} {}", prompt.index, prompt.total, prompt.label);
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{}", line);
        if let Some(description) = &prompt.description {
            println!("{}", description);
        }
        if self.verbosity.is_verbose() && !prompt.choices.is_empty() {
            println!("Choices: {}", prompt.choices.join(", "));
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {}", debug);
        }
    }

    pub fn show_completion(&self, responses: &ResponseSet) {
        println!("Done ✅");
        match responses.to_cbor() {
            Ok(bytes) => {
                println!("Responses (CBOR hex): {}", encode_hex(&bytes));
            }
            Err(err) => {
                eprintln!("Failed to serialize responses to CBOR: {}", err);
            }
        }
        if self.show_responses_json {
            match responses.to_json_pretty() {
                Ok(pretty) => println!("{}", pretty),
                Err(err) => {
                    eprintln!("Failed to serialize responses to JSON: {}", err);
                }
            }
        }
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
