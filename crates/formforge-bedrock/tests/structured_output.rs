//! Structured-output parsing tests. These run without AWS credentials —
//! they exercise the completion-to-draft path on canned text.

use formforge_bedrock::error::GenerateError;
use formforge_bedrock::generate::draft_from_response_text;

const GOOD_COMPLETION: &str = r#"{
  "form_name": "Dentist Appointment",
  "description": "Book a visit with our clinic.",
  "category": "appointment",
  "fields": [
    {
      "field_id": "patient_name",
      "type": "NAME",
      "display_name": "Patient name",
      "mandatory": true
    },
    {
      "field_id": "visit_reason",
      "type": "DROPDOWN",
      "display_name": "Reason for visit",
      "mandatory": true,
      "choices": ["Checkup", "Cleaning", "Emergency"]
    },
    {
      "field_id": "preferred_date",
      "type": "DATE",
      "display_name": "Preferred date",
      "mandatory": false
    }
  ]
}"#;

#[test]
fn parses_a_clean_completion() {
    let draft = draft_from_response_text(GOOD_COMPLETION).unwrap();
    assert_eq!(draft.form_name, "Dentist Appointment");
    assert_eq!(draft.fields.len(), 3);
    assert!(draft.fields[0].mandatory);
}

/// Models routinely wrap JSON in a markdown fence even when told not to.
#[test]
fn unwraps_a_fenced_completion() {
    let fenced = format!("```json\n{GOOD_COMPLETION}\n```");
    let draft = draft_from_response_text(&fenced).unwrap();
    assert_eq!(draft.fields.len(), 3);
}

#[test]
fn prose_only_completion_is_malformed_output() {
    let err = draft_from_response_text("Sorry, I can't help with that.").unwrap_err();
    assert!(matches!(err, GenerateError::MalformedOutput(_)));
}

/// A completion that omits the `fields` key fails as MalformedOutput —
/// no repair is attempted.
#[test]
fn missing_fields_key_is_malformed_output() {
    let text = r#"{"form_name": "Oops", "description": "", "category": "custom"}"#;
    let err = draft_from_response_text(text).unwrap_err();
    assert!(matches!(err, GenerateError::MalformedOutput(_)));
}

#[test]
fn unknown_field_type_is_malformed_output() {
    let text = r#"{
      "form_name": "Oops",
      "category": "custom",
      "fields": [
        {"field_id": "x", "type": "HOLOGRAM", "display_name": "X"}
      ]
    }"#;
    let err = draft_from_response_text(text).unwrap_err();
    assert!(matches!(err, GenerateError::MalformedOutput(_)));
}

/// A parseable completion with an invalid schema surfaces the complete
/// violation list, not a parse error.
#[test]
fn invalid_schema_carries_all_violations() {
    let text = r#"{
      "form_name": "Survey",
      "category": "survey",
      "fields": [
        {"field_id": "q1", "type": "RADIO", "display_name": "Q1"},
        {"field_id": "q1", "type": "SINGLE_LINE", "display_name": "Q1 again"}
      ]
    }"#;

    match draft_from_response_text(text).unwrap_err() {
        GenerateError::InvalidSchema(violations) => {
            assert_eq!(violations.len(), 2);
            assert!(violations.iter().all(|v| v.field_id.as_deref() == Some("q1")));
        }
        other => panic!("expected InvalidSchema, got: {other}"),
    }
}

#[test]
fn empty_field_list_is_invalid_schema() {
    let text = r#"{"form_name": "Empty", "category": "custom", "fields": []}"#;
    let err = draft_from_response_text(text).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidSchema(_)));
}
