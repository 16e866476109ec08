// SPDX-License-Identifier: MIT

//! JSON Schema validation with structured error reporting.
//!
//! Validation is pure: the same schema and payload always produce the same
//! outcome. Compiled validators are cached as statics in
//! [`crate::services::schemas`].

use jsonschema::{error::ValidationErrorKind, Validator};
use serde::Serialize;
use serde_json::{json, Value};

/// One schema violation, machine-readable for client handling.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaViolation {
    /// JSON pointer to the failing location within the payload
    pub path: String,
    /// The violated schema keyword ("required", "type", ...)
    pub keyword: String,
    /// Human-readable description
    pub message: String,
    /// Keyword-specific parameters, e.g. which required property was missing
    pub params: Value,
}

/// Check a payload against a compiled schema.
pub fn is_valid(schema: &Validator, payload: &Value) -> bool {
    schema.is_valid(payload)
}

/// Collect all violations of a payload against a compiled schema, in
/// evaluation order. Empty when the payload is valid.
pub fn violations(schema: &Validator, payload: &Value) -> Vec<SchemaViolation> {
    schema
        .iter_errors(payload)
        .map(|err| {
            let (keyword, params) = describe(err.kind());
            SchemaViolation {
                path: err.instance_path().to_string(),
                keyword: keyword.to_string(),
                message: err.to_string(),
                params,
            }
        })
        .collect()
}

/// Validate a payload, returning the violation list on failure.
pub fn validate(schema: &Validator, payload: &Value) -> Result<(), Vec<SchemaViolation>> {
    if is_valid(schema, payload) {
        return Ok(());
    }
    Err(violations(schema, payload))
}

/// Map an error kind to its schema keyword and parameters.
///
/// Only the keywords our schemas actually use get dedicated parameters;
/// everything else falls back to an empty params object.
fn describe(kind: &ValidationErrorKind) -> (&'static str, Value) {
    match kind {
        ValidationErrorKind::Required { property } => {
            ("required", json!({ "missingProperty": property }))
        }
        ValidationErrorKind::Type { .. } => ("type", json!({})),
        ValidationErrorKind::Enum { options } => ("enum", json!({ "allowedValues": options })),
        ValidationErrorKind::Format { format } => ("format", json!({ "format": format })),
        ValidationErrorKind::Minimum { limit } => ("minimum", json!({ "limit": limit })),
        ValidationErrorKind::Maximum { limit } => ("maximum", json!({ "limit": limit })),
        ValidationErrorKind::AdditionalProperties { unexpected } => (
            "additionalProperties",
            json!({ "unexpectedProperties": unexpected }),
        ),
        _ => ("schema", json!({})),
    }
}
