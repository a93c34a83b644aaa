use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A file a respondent uploaded for a FILE_UPLOAD field. The object was
/// already placed in storage by the upload collaborator; only the
/// resulting identifiers are kept here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UploadedFile {
    pub field_id: String,
    pub storage_id: String,
    pub url: String,
    pub uploaded_at: jiff::Timestamp,
}

/// Request-scoped context captured when a submission arrives.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionMetadata {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    /// Seconds the respondent spent filling the form, when the client
    /// reports it.
    pub time_spent: Option<u64>,
}

/// One respondent's answer set against a specific form. Immutable after
/// creation except for administrative deletion.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Submission {
    pub id: Uuid,
    pub form_id: Uuid,
    pub submitter_email: Option<String>,
    /// field_id → response value. Keys need not cover all fields, but
    /// mandatory fields were present at submit time.
    #[ts(type = "Record<string, unknown>")]
    pub responses: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(default)]
    pub metadata: SubmissionMetadata,
    pub submitted_at: jiff::Timestamp,
}
