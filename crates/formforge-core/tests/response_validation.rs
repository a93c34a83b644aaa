//! Response validator tests: mandatory handling, the per-type value
//! shape table, and custom rule ordering.

use formforge_core::models::field::{FieldDefinition, FieldType, FieldValidation};
use formforge_core::responses::validate_responses;
use serde_json::{Map, Value, json};

fn field(id: &str, name: &str, field_type: FieldType) -> FieldDefinition {
    FieldDefinition {
        field_id: id.to_string(),
        field_type,
        display_name: name.to_string(),
        mandatory: false,
        choices: Vec::new(),
        grid_options: Vec::new(),
        validation: None,
        placeholder: None,
    }
}

fn responses(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn empty_mapping_means_acceptable() {
    let fields = vec![field("name", "Name", FieldType::Name)];
    let errors = validate_responses(&fields, &responses(&[("name", json!("Ada"))]));
    assert!(errors.is_empty());
}

#[test]
fn omitted_mandatory_field_is_reported_alone() {
    let mut email = field("email", "Email", FieldType::Email);
    email.mandatory = true;

    let errors = validate_responses(&[email], &Map::new());

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("email").map(String::as_str), Some("Email is required"));
}

#[test]
fn empty_string_counts_as_missing() {
    let mut name = field("name", "Full name", FieldType::Name);
    name.mandatory = true;

    let errors = validate_responses(&[name], &responses(&[("name", json!(""))]));
    assert_eq!(errors.get("name").map(String::as_str), Some("Full name is required"));
}

#[test]
fn unchecked_mandatory_consent_box_is_missing() {
    let mut consent = field("consent", "Terms", FieldType::Checkbox);
    consent.mandatory = true;

    let errors = validate_responses(&[consent], &responses(&[("consent", json!(false))]));
    assert_eq!(errors.get("consent").map(String::as_str), Some("Terms is required"));
}

/// Pure function: the same inputs always yield the same mapping.
#[test]
fn validation_is_idempotent() {
    let mut email = field("email", "Email", FieldType::Email);
    email.mandatory = true;
    let fields = vec![email, field("phone", "Phone", FieldType::Phone)];
    let values = responses(&[("phone", json!("not a phone!"))]);

    let first = validate_responses(&fields, &values);
    let second = validate_responses(&fields, &values);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn rejects_malformed_email() {
    let email = field("email", "Email", FieldType::Email);
    let errors = validate_responses(&[email], &responses(&[("email", json!("no-at-sign"))]));
    assert_eq!(errors.get("email").map(String::as_str), Some("Invalid email address"));
}

#[test]
fn accepts_plain_email() {
    let email = field("email", "Email", FieldType::Email);
    let errors =
        validate_responses(&[email], &responses(&[("email", json!("ada@example.com"))]));
    assert!(errors.is_empty());
}

#[test]
fn phone_allows_digits_spaces_and_punctuation_only() {
    let phone = field("phone", "Phone", FieldType::Phone);

    let ok = validate_responses(&[phone.clone()], &responses(&[("phone", json!("+1 (555) 000-0000"))]));
    assert!(ok.is_empty());

    let bad = validate_responses(&[phone], &responses(&[("phone", json!("call me maybe"))]));
    assert_eq!(bad.get("phone").map(String::as_str), Some("Invalid phone number"));
}

#[test]
fn date_must_parse_to_a_calendar_date() {
    let date = field("when", "Date", FieldType::Date);

    let ok = validate_responses(&[date.clone()], &responses(&[("when", json!("2026-02-28"))]));
    assert!(ok.is_empty());

    let bad = validate_responses(&[date.clone()], &responses(&[("when", json!("2026-02-30"))]));
    assert!(bad.contains_key("when"));

    let not_a_string = validate_responses(&[date], &responses(&[("when", json!(20260228))]));
    assert!(not_a_string.contains_key("when"));
}

#[test]
fn dropdown_value_must_be_a_listed_choice() {
    let mut topic = field("topic", "Topic", FieldType::Dropdown);
    topic.choices = vec!["Sales".to_string(), "Support".to_string()];

    let ok = validate_responses(&[topic.clone()], &responses(&[("topic", json!("Sales"))]));
    assert!(ok.is_empty());

    let bad = validate_responses(&[topic], &responses(&[("topic", json!("Gossip"))]));
    assert!(bad.contains_key("topic"));
}

#[test]
fn checkbox_with_choices_takes_a_subset() {
    let mut days = field("days", "Days", FieldType::Checkbox);
    days.choices = vec!["Mon".to_string(), "Tue".to_string(), "Wed".to_string()];

    let ok = validate_responses(&[days.clone()], &responses(&[("days", json!(["Mon", "Wed"]))]));
    assert!(ok.is_empty());

    let bad = validate_responses(&[days], &responses(&[("days", json!(["Mon", "Sun"]))]));
    assert!(bad.contains_key("days"));
}

#[test]
fn bare_checkbox_takes_a_boolean() {
    let agree = field("agree", "Agree", FieldType::Checkbox);

    let ok = validate_responses(&[agree.clone()], &responses(&[("agree", json!(true))]));
    assert!(ok.is_empty());

    let bad = validate_responses(&[agree], &responses(&[("agree", json!("yes"))]));
    assert!(bad.contains_key("agree"));
}

#[test]
fn rating_is_an_integer_on_the_fixed_scale() {
    let stars = field("stars", "Rating", FieldType::Rating);

    for good in [1, 3, 5] {
        let ok = validate_responses(&[stars.clone()], &responses(&[("stars", json!(good))]));
        assert!(ok.is_empty(), "rating {good} should pass");
    }
    for bad in [json!(0), json!(6), json!(3.5), json!("4")] {
        let errors = validate_responses(&[stars.clone()], &responses(&[("stars", bad.clone())]));
        assert!(errors.contains_key("stars"), "rating {bad} should fail");
    }
}

#[test]
fn file_upload_checks_descriptor_presence_only() {
    let resume = field("resume", "Resume", FieldType::FileUpload);

    let descriptor = json!({
        "storage_id": "uploads/a/b/resume.pdf",
        "url": "https://bucket.s3.amazonaws.com/uploads/a/b/resume.pdf",
        "file_name": "resume.pdf",
        "file_size": 10240,
        "file_type": "application/pdf"
    });
    let ok = validate_responses(&[resume.clone()], &responses(&[("resume", descriptor)]));
    assert!(ok.is_empty());

    let bad = validate_responses(&[resume], &responses(&[("resume", json!("resume.pdf"))]));
    assert!(bad.contains_key("resume"));
}

#[test]
fn grid_rows_must_select_from_grid_options() {
    let mut grid = field("satisfaction", "Satisfaction", FieldType::Grid);
    grid.grid_options = vec!["Poor".to_string(), "Fair".to_string(), "Good".to_string()];

    let ok = validate_responses(
        &[grid.clone()],
        &responses(&[("satisfaction", json!({"Food": "Good", "Service": "Fair"}))]),
    );
    assert!(ok.is_empty());

    let bad = validate_responses(
        &[grid],
        &responses(&[("satisfaction", json!({"Food": "Stellar"}))]),
    );
    assert!(bad.contains_key("satisfaction"));
}

#[test]
fn custom_rules_apply_in_order_first_failure_wins() {
    let mut code = field("code", "Code", FieldType::SingleLine);
    code.validation = Some(FieldValidation {
        min_length: Some(4),
        max_length: Some(6),
        pattern: Some("^[A-Z]+$".to_string()),
    });

    let too_short = validate_responses(&[code.clone()], &responses(&[("code", json!("AB"))]));
    assert_eq!(
        too_short.get("code").map(String::as_str),
        Some("Minimum 4 characters required")
    );

    let too_long =
        validate_responses(&[code.clone()], &responses(&[("code", json!("ABCDEFG"))]));
    assert_eq!(
        too_long.get("code").map(String::as_str),
        Some("Maximum 6 characters allowed")
    );

    let wrong_shape = validate_responses(&[code.clone()], &responses(&[("code", json!("abcd"))]));
    assert_eq!(wrong_shape.get("code").map(String::as_str), Some("Invalid format"));

    let ok = validate_responses(&[code], &responses(&[("code", json!("ABCD"))]));
    assert!(ok.is_empty());
}

#[test]
fn optional_fields_may_be_omitted() {
    let fields = vec![
        field("email", "Email", FieldType::Email),
        field("phone", "Phone", FieldType::Phone),
    ];
    let errors = validate_responses(&fields, &Map::new());
    assert!(errors.is_empty());
}

/// Errors accumulate across every violating field in a single pass.
#[test]
fn reports_all_fields_at_once() {
    let mut name = field("name", "Name", FieldType::Name);
    name.mandatory = true;
    let fields = vec![
        name,
        field("email", "Email", FieldType::Email),
        field("stars", "Rating", FieldType::Rating),
    ];
    let values = responses(&[("email", json!("nope")), ("stars", json!(9))]);

    let errors = validate_responses(&fields, &values);
    assert_eq!(errors.len(), 3);
}
