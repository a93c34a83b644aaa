//! Response validation against a persisted field schema.
//!
//! One dispatch over the closed [`FieldType`] enumeration: each kind maps
//! to exactly one expected response value shape. The renderer and this
//! validator stay in lockstep because both derive from this table.
//!
//! [`validate_responses`] is a pure function — it never mutates its
//! inputs and holds no state, so identical (fields, responses) pairs
//! always produce identical results. An empty returned mapping means the
//! response set is acceptable for submission.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::models::field::{FieldDefinition, FieldType};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("phone regex"));

/// field_id → human-readable message for every violated field.
pub type ResponseErrors = BTreeMap<String, String>;

/// Validate a submitted response set against a form's field list.
///
/// Checks, in order per field: mandatory presence, the type-specific
/// value-shape rule, then any custom `validation` block (min_length,
/// max_length, pattern — first failing rule wins). Errors accumulate
/// across all fields so the respondent sees the complete list in one
/// round trip.
pub fn validate_responses(
    fields: &[FieldDefinition],
    responses: &serde_json::Map<String, Value>,
) -> ResponseErrors {
    let mut errors = ResponseErrors::new();

    for field in fields {
        let value = responses.get(&field.field_id);

        if field.mandatory && value.is_none_or(is_empty_value) {
            errors.insert(
                field.field_id.clone(),
                format!("{} is required", field.display_name),
            );
            continue;
        }

        let Some(value) = value.filter(|v| !is_empty_value(v)) else {
            continue;
        };

        if let Some(message) = check_typed_value(field, value) {
            errors.insert(field.field_id.clone(), message);
            continue;
        }

        if let Some(validation) = &field.validation
            && let Some(text) = value.as_str()
            && let Some(message) = check_custom_rules(validation, text)
        {
            errors.insert(field.field_id.clone(), message);
        }
    }

    errors
}

/// Absent-equivalent values: a mandatory field must hold more than this.
/// `false` counts as empty so an unchecked mandatory consent box is
/// reported as missing rather than accepted.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// The per-type value-shape rule. Returns a message on violation.
fn check_typed_value(field: &FieldDefinition, value: &Value) -> Option<String> {
    match field.field_type {
        FieldType::Name
        | FieldType::SingleLine
        | FieldType::MultiLine
        | FieldType::Address
        | FieldType::Signature => expect_string(field, value),

        FieldType::Email => match value.as_str() {
            Some(text) if EMAIL_RE.is_match(text) => None,
            _ => Some("Invalid email address".to_string()),
        },

        FieldType::Phone => match value.as_str() {
            Some(text) if PHONE_RE.is_match(text) => None,
            _ => Some("Invalid phone number".to_string()),
        },

        FieldType::Date => match value.as_str() {
            Some(text) => text
                .parse::<jiff::civil::Date>()
                .is_err()
                .then(|| format!("{} must be a valid date", field.display_name)),
            None => Some(format!("{} must be a date string", field.display_name)),
        },

        FieldType::Dropdown | FieldType::Radio => match value.as_str() {
            Some(text) if field.choices.iter().any(|c| c == text) => None,
            _ => Some(format!(
                "{} must be one of the available choices",
                field.display_name
            )),
        },

        // A bare checkbox (no choices) is a boolean; with choices it is a
        // subset selection like MULTIPLE_CHOICE.
        FieldType::Checkbox => {
            if field.choices.is_empty() {
                (!value.is_boolean())
                    .then(|| format!("{} must be true or false", field.display_name))
            } else {
                expect_choice_subset(field, value)
            }
        }

        FieldType::MultipleChoice => expect_choice_subset(field, value),

        FieldType::Rating => match value.as_i64() {
            Some(n) if (1..=5).contains(&n) => None,
            _ => Some(format!(
                "{} must be a rating between 1 and 5",
                field.display_name
            )),
        },

        // Content was already validated by the upload collaborator;
        // only the descriptor's presence matters here.
        FieldType::FileUpload => (!value.is_object())
            .then(|| format!("{} must be an uploaded file", field.display_name)),

        FieldType::Grid => expect_grid_selections(field, value),
    }
}

fn expect_string(field: &FieldDefinition, value: &Value) -> Option<String> {
    (!value.is_string()).then(|| format!("{} must be text", field.display_name))
}

fn expect_choice_subset(field: &FieldDefinition, value: &Value) -> Option<String> {
    let Some(items) = value.as_array() else {
        return Some(format!(
            "{} must be a list of choices",
            field.display_name
        ));
    };
    let all_members = items.iter().all(|item| {
        item.as_str()
            .is_some_and(|text| field.choices.iter().any(|c| c == text))
    });
    (!all_members).then(|| {
        format!(
            "{} may only contain the available choices",
            field.display_name
        )
    })
}

/// GRID responses are an object of row label → selected option; every
/// selection must be a member of `grid_options`.
fn expect_grid_selections(field: &FieldDefinition, value: &Value) -> Option<String> {
    let Some(rows) = value.as_object() else {
        return Some(format!(
            "{} must map each row to a selection",
            field.display_name
        ));
    };
    let all_members = rows.values().all(|selection| {
        selection
            .as_str()
            .is_some_and(|text| field.grid_options.iter().any(|o| o == text))
    });
    (!all_members).then(|| {
        format!(
            "{} selections must come from the grid options",
            field.display_name
        )
    })
}

/// min_length, max_length, pattern — in that order, first failure wins.
/// Patterns were syntax-checked at schema validation time; one that
/// fails to compile here is skipped rather than blamed on the respondent.
fn check_custom_rules(
    validation: &crate::models::field::FieldValidation,
    text: &str,
) -> Option<String> {
    if let Some(min) = validation.min_length
        && (text.chars().count() as u32) < min
    {
        return Some(format!("Minimum {min} characters required"));
    }
    if let Some(max) = validation.max_length
        && (text.chars().count() as u32) > max
    {
        return Some(format!("Maximum {max} characters allowed"));
    }
    if let Some(pattern) = &validation.pattern
        && let Ok(re) = Regex::new(pattern)
        && !re.is_match(text)
    {
        return Some("Invalid format".to_string());
    }
    None
}
