//! Slug reservation markers.
//!
//! Each reserved slug is a small marker document at `slugs/{slug}.json`
//! holding the owning form's id, so the marker is both the uniqueness
//! constraint and the slug → form-id index for public access. Markers
//! are written with `If-None-Match: *`; the 412 a concurrent creation
//! provokes is the authoritative conflict signal.

use aws_sdk_s3::Client;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use formforge_core::s3_keys;
use formforge_core::slug::allocate_slug;

use crate::docs;
use crate::error::StorageError;

#[derive(Debug, Serialize, Deserialize)]
struct SlugMarker {
    form_id: Uuid,
}

/// Derive a unique slug for `form_name` and reserve it for `form_id`.
///
/// Probes the reserved set once, allocates, and writes the marker
/// conditionally. If a concurrent creation wins the race between probe
/// and write, allocation re-runs once with a fresh probe; a second loss
/// surfaces as [`StorageError::SlugTaken`], which the caller may retry.
pub async fn allocate_and_reserve(
    client: &Client,
    bucket: &str,
    form_name: &str,
    form_id: Uuid,
) -> Result<String, StorageError> {
    for _ in 0..2 {
        let slug = probe_and_allocate(client, bucket, form_name).await?;

        match docs::put_if_none_match(
            client,
            bucket,
            &s3_keys::slug(&slug),
            &SlugMarker { form_id },
        )
        .await
        {
            Ok(()) => {
                info!(slug = %slug, form_id = %form_id, "slug reserved");
                return Ok(slug);
            }
            Err(StorageError::PreconditionFailed { .. }) => continue,
            Err(other) => return Err(other),
        }
    }

    Err(StorageError::SlugTaken {
        slug: formforge_core::slug::slugify(form_name),
    })
}

/// Resolve a slug to its form id. `NotFound` for unknown slugs.
pub async fn resolve(client: &Client, bucket: &str, slug: &str) -> Result<Uuid, StorageError> {
    let (marker, _): (SlugMarker, _) = docs::get(client, bucket, &s3_keys::slug(slug)).await?;
    Ok(marker.form_id)
}

/// Drop a reservation (form deletion).
pub async fn release(client: &Client, bucket: &str, slug: &str) -> Result<(), StorageError> {
    docs::delete(client, bucket, &s3_keys::slug(slug)).await
}

/// One listing of the already-reserved set feeds the pure allocation
/// loop as its existence predicate.
async fn probe_and_allocate(
    client: &Client,
    bucket: &str,
    form_name: &str,
) -> Result<String, StorageError> {
    let base = formforge_core::slug::slugify(form_name);
    let prefix = format!("{}{base}", s3_keys::SLUGS_PREFIX);

    let reserved: std::collections::HashSet<String> =
        docs::list_keys(client, bucket, &prefix)
            .await?
            .into_iter()
            .filter_map(|key| {
                key.strip_prefix(s3_keys::SLUGS_PREFIX)
                    .and_then(|rest| rest.strip_suffix(".json"))
                    .map(String::from)
            })
            .collect();

    Ok(allocate_slug(form_name, |candidate| {
        reserved.contains(candidate)
    }))
}
