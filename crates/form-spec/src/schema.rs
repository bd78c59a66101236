use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spec::FormField;

/// Version stamped into every exported document.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Derived document metadata, recomputed at export time so it can never
/// drift from the field sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    pub created_at: DateTime<Utc>,
    pub version: String,
    pub field_count: usize,
    pub required_fields: usize,
}

/// Portable form document: the ordered field sequence plus derived metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormSchema {
    pub fields: Vec<FormField>,
    pub metadata: SchemaMetadata,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse schema JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to encode schema JSON: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("schema version '{0}' is not supported")]
    UnsupportedVersion(String),
    #[error("field id '{0}' appears more than once")]
    DuplicateFieldId(String),
}

/// Export the field sequence as a portable document.
pub fn export_schema(fields: &[FormField]) -> FormSchema {
    FormSchema {
        fields: fields.to_vec(),
        metadata: SchemaMetadata {
            created_at: Utc::now(),
            version: SCHEMA_VERSION.to_string(),
            field_count: fields.len(),
            required_fields: fields.iter().filter(|field| field.required).count(),
        },
    }
}

pub fn export_json(fields: &[FormField]) -> Result<String, SchemaError> {
    serde_json::to_string_pretty(&export_schema(fields)).map_err(SchemaError::Encode)
}

/// Structural inverse of `export_schema`: reconstructs field order and every
/// optional attribute exactly.
pub fn import_schema(json: &str) -> Result<Vec<FormField>, SchemaError> {
    let document: FormSchema = serde_json::from_str(json).map_err(SchemaError::Parse)?;

    let major = document.metadata.version.split('.').next().unwrap_or("");
    if major != "1" {
        return Err(SchemaError::UnsupportedVersion(document.metadata.version));
    }

    let mut seen = BTreeSet::new();
    for field in &document.fields {
        if !seen.insert(field.id.clone()) {
            return Err(SchemaError::DuplicateFieldId(field.id.clone()));
        }
    }

    Ok(document.fields)
}
