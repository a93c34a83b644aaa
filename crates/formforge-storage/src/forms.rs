//! Form document repository, including the atomic submission-stat
//! increment and the cascade delete.

use aws_sdk_s3::Client;
use tracing::{info, warn};
use uuid::Uuid;

use formforge_core::models::form::Form;
use formforge_core::s3_keys;

use crate::error::StorageError;
use crate::{docs, slugs, submissions};

/// CAS attempts on the form document before giving up under contention.
const MAX_STAT_ATTEMPTS: u32 = 8;

pub async fn load(client: &Client, bucket: &str, id: Uuid) -> Result<Form, StorageError> {
    let (form, _) = docs::get(client, bucket, &s3_keys::form(id)).await?;
    Ok(form)
}

pub async fn save(client: &Client, bucket: &str, form: &Form) -> Result<(), StorageError> {
    docs::put(client, bucket, &s3_keys::form(form.id), form).await
}

/// All forms belonging to an owner, newest first.
pub async fn list_for_owner(
    client: &Client,
    bucket: &str,
    owner_id: &str,
) -> Result<Vec<Form>, StorageError> {
    let keys = docs::list_keys(client, bucket, s3_keys::FORMS_PREFIX).await?;

    let mut forms = Vec::new();
    for key in &keys {
        let (form, _): (Form, _) = docs::get(client, bucket, key).await?;
        if form.owner_id == owner_id {
            forms.push(form);
        }
    }

    forms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(forms)
}

/// Bump `submission_stats` for one accepted submission: count + 1 and a
/// fresh `last_submitted_at`.
///
/// Uses ETag compare-and-swap on the form document rather than a blind
/// read-modify-write, so concurrent submitters never lose an increment.
/// A lost race reloads and retries, up to [`MAX_STAT_ATTEMPTS`].
pub async fn record_submission(
    client: &Client,
    bucket: &str,
    form_id: Uuid,
    submitted_at: jiff::Timestamp,
) -> Result<u64, StorageError> {
    let key = s3_keys::form(form_id);

    for attempt in 1..=MAX_STAT_ATTEMPTS {
        let (mut form, etag): (Form, String) = docs::get(client, bucket, &key).await?;

        form.submission_stats.count += 1;
        form.submission_stats.last_submitted_at = Some(submitted_at);
        let new_count = form.submission_stats.count;

        match docs::put_if_match(client, bucket, &key, &form, &etag).await {
            Ok(_) => return Ok(new_count),
            Err(StorageError::PreconditionFailed { .. }) => {
                warn!(form_id = %form_id, attempt, "stat increment lost a race, retrying");
                tokio::time::sleep(std::time::Duration::from_millis(25 * attempt as u64)).await;
            }
            Err(other) => return Err(other),
        }
    }

    Err(StorageError::StatContention {
        form_id: form_id.to_string(),
    })
}

/// Delete a form and everything hanging off it: the slug reservation,
/// all submissions, and all uploaded objects. No submission may outlive
/// its form.
pub async fn delete_cascade(
    client: &Client,
    bucket: &str,
    form: &Form,
) -> Result<(), StorageError> {
    let removed = submissions::delete_all_for_form(client, bucket, form.id).await?;
    docs::delete_prefix(client, bucket, &s3_keys::uploads_prefix(form.id)).await?;
    slugs::release(client, bucket, &form.slug).await?;
    docs::delete(client, bucket, &s3_keys::form(form.id)).await?;

    info!(form_id = %form.id, submissions_removed = removed, "form deleted");
    Ok(())
}
