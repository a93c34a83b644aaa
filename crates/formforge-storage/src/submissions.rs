//! Submission document repository. Submissions nest under their form's
//! key prefix, so everything about one form's responses is a prefix
//! listing away and a cascade delete is a prefix delete.

use aws_sdk_s3::Client;
use uuid::Uuid;

use formforge_core::models::submission::Submission;
use formforge_core::s3_keys;

use crate::docs;
use crate::error::StorageError;

pub async fn save(
    client: &Client,
    bucket: &str,
    submission: &Submission,
) -> Result<(), StorageError> {
    let key = s3_keys::submission(submission.form_id, submission.id);
    docs::put(client, bucket, &key, submission).await
}

pub async fn load(
    client: &Client,
    bucket: &str,
    form_id: Uuid,
    id: Uuid,
) -> Result<Submission, StorageError> {
    let (submission, _) =
        docs::get(client, bucket, &s3_keys::submission(form_id, id)).await?;
    Ok(submission)
}

/// All submissions for a form, newest first.
pub async fn list_for_form(
    client: &Client,
    bucket: &str,
    form_id: Uuid,
) -> Result<Vec<Submission>, StorageError> {
    let keys = docs::list_keys(client, bucket, &s3_keys::submissions_prefix(form_id)).await?;

    let mut submissions = Vec::new();
    for key in &keys {
        let (submission, _): (Submission, _) = docs::get(client, bucket, key).await?;
        submissions.push(submission);
    }

    submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    Ok(submissions)
}

/// Remove every submission belonging to a form. Returns the number
/// removed.
pub async fn delete_all_for_form(
    client: &Client,
    bucket: &str,
    form_id: Uuid,
) -> Result<usize, StorageError> {
    docs::delete_prefix(client, bucket, &s3_keys::submissions_prefix(form_id)).await
}
