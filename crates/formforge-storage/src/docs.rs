//! JSON document primitives over S3. Everything in this crate stores
//! typed documents; the conditional variants carry the concurrency
//! guarantees (`If-Match` for CAS updates, `If-None-Match: *` for
//! create-only writes).

use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Fetch and deserialize a document. Returns the value and its ETag.
pub(crate) async fn get<T: DeserializeOwned>(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<(T, String), StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let etag = resp.e_tag().unwrap_or_default().to_string();
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes();

    let value: T = serde_json::from_slice(&body)?;
    Ok((value, etag))
}

/// Serialize and store a document unconditionally.
pub(crate) async fn put<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(value)?;
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("application/json")
        .body(ByteStream::from(body))
        .send()
        .await
        .map_err(|e| StorageError::PutObject(e.into_service_error().to_string()))?;
    Ok(())
}

/// Store a document only if its ETag still matches (optimistic locking).
/// Returns the new ETag, or `PreconditionFailed` when a concurrent
/// writer got there first.
pub(crate) async fn put_if_match<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError> {
    let body = serde_json::to_vec(value)?;
    let resp = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("application/json")
        .body(ByteStream::from(body))
        .if_match(expected_etag)
        .send()
        .await
        .map_err(|e| precondition_or_put_error(e.into_service_error(), key))?;
    Ok(resp.e_tag().unwrap_or_default().to_string())
}

/// Store a document only if the key does not exist yet. S3 answers 412
/// when it does — the authoritative uniqueness signal.
pub(crate) async fn put_if_none_match<T: Serialize>(
    client: &Client,
    bucket: &str,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec(value)?;
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type("application/json")
        .body(ByteStream::from(body))
        .if_none_match("*")
        .send()
        .await
        .map_err(|e| precondition_or_put_error(e.into_service_error(), key))?;
    Ok(())
}

fn precondition_or_put_error(
    err: impl std::fmt::Display,
    key: &str,
) -> StorageError {
    let text = err.to_string();
    // S3 reports both failed If-Match and failed If-None-Match as 412.
    if text.contains("PreconditionFailed") {
        StorageError::PreconditionFailed {
            key: key.to_string(),
        }
    } else {
        StorageError::PutObject(text)
    }
}

pub(crate) async fn delete(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<(), StorageError> {
    client
        .delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| StorageError::DeleteObject(e.into_service_error().to_string()))?;
    Ok(())
}

/// List every key under a prefix, following continuation tokens.
pub(crate) async fn list_keys(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<String>, StorageError> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let mut req = client.list_objects_v2().bucket(bucket).prefix(prefix);

        if let Some(token) = &continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                keys.push(key.to_string());
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(|s| s.to_string());
        } else {
            break;
        }
    }

    Ok(keys)
}

/// Delete every key under a prefix. Returns the number deleted.
pub(crate) async fn delete_prefix(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<usize, StorageError> {
    let keys = list_keys(client, bucket, prefix).await?;
    let count = keys.len();
    for key in &keys {
        delete(client, bucket, key).await?;
    }
    Ok(count)
}
