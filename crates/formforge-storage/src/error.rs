use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("precondition failed for key: {key}")]
    PreconditionFailed { key: String },

    /// Slug reservation lost to a concurrent creation even after a fresh
    /// probe. Retryable from the caller's point of view.
    #[error("slug already taken: {slug}")]
    SlugTaken { slug: String },

    /// CAS retries on the form document ran out under contention.
    #[error("stat update contention on form {form_id}")]
    StatContention { form_id: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 PutObject error: {0}")]
    PutObject(String),

    #[error("S3 DeleteObject error: {0}")]
    DeleteObject(String),

    #[error("S3 ListObjects error: {0}")]
    ListObjects(String),

    #[error("S3 presign error: {0}")]
    Presign(String),
}
