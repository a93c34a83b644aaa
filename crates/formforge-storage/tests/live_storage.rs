//! Live storage tests. These call the real S3 API and require valid
//! credentials in the environment plus a scratch bucket named by
//! `FORMFORGE_TEST_BUCKET`.
//!
//! Run with: `cargo test -p formforge-storage --test live_storage -- --ignored`

use std::env;

use formforge_core::models::field::{FieldDefinition, FieldType};
use formforge_core::models::form::{Form, FormCategory, Sharing, SubmissionStats};
use formforge_core::models::submission::{Submission, SubmissionMetadata};
use formforge_storage::{client, forms, slugs, submissions};
use uuid::Uuid;

fn test_bucket() -> String {
    env::var("FORMFORGE_TEST_BUCKET").expect("FORMFORGE_TEST_BUCKET must be set")
}

fn sample_form(owner: &str, slug: &str) -> Form {
    let now = jiff::Timestamp::now();
    Form {
        id: Uuid::new_v4(),
        owner_id: owner.to_string(),
        form_name: "Live Test Form".to_string(),
        slug: slug.to_string(),
        description: None,
        category: FormCategory::Custom,
        fields: vec![FieldDefinition {
            field_id: "note".to_string(),
            field_type: FieldType::SingleLine,
            display_name: "Note".to_string(),
            mandatory: false,
            choices: Vec::new(),
            grid_options: Vec::new(),
            validation: None,
            placeholder: None,
        }],
        generated_prompt: None,
        submission_stats: SubmissionStats::default(),
        sharing: Sharing::default(),
        created_at: now,
        updated_at: now,
    }
}

fn sample_submission(form_id: Uuid) -> Submission {
    Submission {
        id: Uuid::new_v4(),
        form_id,
        submitter_email: None,
        responses: serde_json::Map::new(),
        uploaded_files: Vec::new(),
        metadata: SubmissionMetadata::default(),
        submitted_at: jiff::Timestamp::now(),
    }
}

/// Two reservations from the same name get distinct slugs; the second
/// carries a numeric suffix.
#[tokio::test]
#[ignore]
async fn concurrent_slug_reservations_never_collide() {
    let s3 = client::build_client().await;
    let bucket = test_bucket();
    let name = format!("Slug Race {}", Uuid::new_v4());

    let first = slugs::allocate_and_reserve(&s3, &bucket, &name, Uuid::new_v4())
        .await
        .expect("first reservation");
    let second = slugs::allocate_and_reserve(&s3, &bucket, &name, Uuid::new_v4())
        .await
        .expect("second reservation");

    assert_ne!(first, second);
    assert_eq!(second, format!("{first}-1"));

    slugs::release(&s3, &bucket, &first).await.unwrap();
    slugs::release(&s3, &bucket, &second).await.unwrap();
}

/// 100 concurrent submissions each land exactly one increment — the CAS
/// loop loses no updates.
#[tokio::test]
#[ignore]
async fn concurrent_submission_increments_are_lossless() {
    let s3 = client::build_client().await;
    let bucket = test_bucket();

    let form = sample_form("live-test-owner", &format!("inc-{}", Uuid::new_v4()));
    forms::save(&s3, &bucket, &form).await.expect("save form");

    let mut handles = Vec::new();
    for _ in 0..100 {
        let s3 = s3.clone();
        let bucket = bucket.clone();
        let form_id = form.id;
        handles.push(tokio::spawn(async move {
            forms::record_submission(&s3, &bucket, form_id, jiff::Timestamp::now()).await
        }));
    }
    for handle in handles {
        handle.await.expect("task").expect("increment");
    }

    let stored = forms::load(&s3, &bucket, form.id).await.expect("reload");
    assert_eq!(stored.submission_stats.count, 100);
    assert!(stored.submission_stats.last_submitted_at.is_some());

    forms::delete_cascade(&s3, &bucket, &stored).await.unwrap();
}

/// Deleting a form removes every submission referencing it.
#[tokio::test]
#[ignore]
async fn cascade_delete_leaves_no_submissions() {
    let s3 = client::build_client().await;
    let bucket = test_bucket();

    let form = sample_form("live-test-owner", &format!("cascade-{}", Uuid::new_v4()));
    forms::save(&s3, &bucket, &form).await.expect("save form");

    for _ in 0..2 {
        submissions::save(&s3, &bucket, &sample_submission(form.id))
            .await
            .expect("save submission");
    }
    assert_eq!(
        submissions::list_for_form(&s3, &bucket, form.id)
            .await
            .unwrap()
            .len(),
        2
    );

    forms::delete_cascade(&s3, &bucket, &form).await.expect("cascade");

    let remaining = submissions::list_for_form(&s3, &bucket, form.id)
        .await
        .unwrap();
    assert!(remaining.is_empty());
}
