//! Public-sharing round-trip behavior.

use formforge_core::models::form::{Form, FormCategory, Sharing, SubmissionStats};
use uuid::Uuid;

fn sample_form() -> Form {
    let now: jiff::Timestamp = "2026-08-06T00:00:00Z".parse().unwrap();
    Form {
        id: Uuid::new_v4(),
        owner_id: "owner-sub".to_string(),
        form_name: "Feedback".to_string(),
        slug: "feedback".to_string(),
        description: None,
        category: FormCategory::Feedback,
        fields: Vec::new(),
        generated_prompt: None,
        submission_stats: SubmissionStats::default(),
        sharing: Sharing {
            is_public: false,
            share_token: Some("tok-1234".to_string()),
        },
        created_at: now,
        updated_at: now,
    }
}

/// Toggling public on, off, on returns the form to its original sharing
/// state, and the share token never changes across toggles.
#[test]
fn publish_toggle_round_trips_and_keeps_token() {
    let mut form = sample_form();
    let original_token = form.sharing.share_token.clone();

    form.toggle_public();
    assert!(form.sharing.is_public);
    form.toggle_public();
    assert!(!form.sharing.is_public);
    form.toggle_public();
    assert!(form.sharing.is_public);

    assert_eq!(form.sharing.share_token, original_token);
}

#[test]
fn public_view_strips_owner_and_prompt() {
    let mut form = sample_form();
    form.generated_prompt = Some("make me a feedback form".to_string());

    let public = formforge_core::models::form::PublicForm::from(form);
    let serialized = serde_json::to_value(&public).unwrap();

    assert!(serialized.get("owner_id").is_none());
    assert!(serialized.get("generated_prompt").is_none());
    assert_eq!(serialized["slug"], "feedback");
}
