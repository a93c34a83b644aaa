//! Schema validation for candidate forms.
//!
//! A candidate is untrusted — it came from a model completion or a user
//! edit payload. Everything that would make it unsafe to render or
//! persist is collected here, in one pass, so the caller can report every
//! problem at once instead of round-tripping per failure.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::models::field::FieldType;
use crate::models::form::FormDraft;

/// One structural problem in a candidate schema. `field_id` is `None`
/// for form-level problems.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct SchemaViolation {
    pub field_id: Option<String>,
    pub message: String,
}

impl SchemaViolation {
    fn form(message: impl Into<String>) -> Self {
        SchemaViolation {
            field_id: None,
            message: message.into(),
        }
    }

    fn field(field_id: &str, message: impl Into<String>) -> Self {
        SchemaViolation {
            field_id: Some(field_id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a candidate schema before persistence.
///
/// Accumulates every violation rather than failing fast. A draft that
/// passes is safe to hand to the response validator and to persist as a
/// form's field list. Field types are already members of the closed
/// enumeration by construction — unknown tags never deserialize into a
/// [`FieldType`].
pub fn validate_form_schema(draft: &FormDraft) -> Result<(), Vec<SchemaViolation>> {
    let mut violations = Vec::new();

    if draft.form_name.trim().is_empty() {
        violations.push(SchemaViolation::form("form name must not be empty"));
    }
    if draft.fields.is_empty() {
        violations.push(SchemaViolation::form("form must contain at least one field"));
    }

    let mut seen_ids: HashSet<&str> = HashSet::new();

    for field in &draft.fields {
        let id = field.field_id.as_str();

        if id.trim().is_empty() {
            violations.push(SchemaViolation::form(format!(
                "field \"{}\" is missing a field id",
                field.display_name
            )));
            continue;
        }
        if !seen_ids.insert(id) {
            violations.push(SchemaViolation::field(
                id,
                format!("duplicate field id \"{id}\""),
            ));
        }

        if field.field_type.is_choice_type() && field.choices.is_empty() {
            violations.push(SchemaViolation::field(
                id,
                format!(
                    "\"{}\" requires a non-empty choices list",
                    field.display_name
                ),
            ));
        }

        if field.field_type == FieldType::Grid && field.grid_options.is_empty() {
            violations.push(SchemaViolation::field(
                id,
                format!(
                    "\"{}\" requires a non-empty grid_options list",
                    field.display_name
                ),
            ));
        }

        if let Some(validation) = &field.validation {
            if let Some(pattern) = &validation.pattern
                && let Err(e) = Regex::new(pattern)
            {
                violations.push(SchemaViolation::field(
                    id,
                    format!("invalid validation pattern: {e}"),
                ));
            }

            if let (Some(min), Some(max)) = (validation.min_length, validation.max_length)
                && min > max
            {
                violations.push(SchemaViolation::field(
                    id,
                    format!("min_length {min} exceeds max_length {max}"),
                ));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
