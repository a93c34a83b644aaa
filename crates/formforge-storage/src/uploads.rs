//! Time-boxed upload credentials for FILE_UPLOAD responses.
//!
//! The respondent PUTs the file straight to S3 with a presigned URL; the
//! submission then references the resulting storage key. The core never
//! sees file bytes.

use std::time::Duration;

use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;

use crate::error::StorageError;

/// Issue a presigned PUT URL for one upload key.
pub async fn presign_put(
    client: &Client,
    bucket: &str,
    key: &str,
    content_type: &str,
    expires_in: Duration,
) -> Result<String, StorageError> {
    let presign_config = PresigningConfig::builder()
        .expires_in(expires_in)
        .build()
        .map_err(|e| StorageError::Presign(e.to_string()))?;

    let presigned = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .content_type(content_type)
        .presigned(presign_config)
        .await
        .map_err(|e| StorageError::Presign(e.to_string()))?;

    Ok(presigned.uri().to_string())
}

/// The stable (non-presigned) URL an uploaded object will have once the
/// PUT completes.
pub fn object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}
