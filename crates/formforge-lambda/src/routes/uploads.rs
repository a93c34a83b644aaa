use std::time::Duration;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use formforge_core::models::field::FieldType;
use formforge_core::s3_keys;
use formforge_storage::{forms, uploads};

use crate::error::ApiError;
use crate::state::AppState;

/// How long an issued upload credential stays valid.
const UPLOAD_URL_TTL: Duration = Duration::from_secs(900);

#[derive(Deserialize)]
pub struct SignUploadRequest {
    pub field_id: String,
    pub file_name: String,
    pub content_type: String,
}

#[derive(Serialize)]
pub struct SignUploadResponse {
    /// Storage key the submission's `uploaded_files` entry references.
    pub storage_id: String,
    /// Stable URL of the object once the PUT completes.
    pub url: String,
    /// Time-boxed presigned PUT URL the client uploads to.
    pub upload_url: String,
    pub expires_in_secs: u64,
}

/// Issue time-boxed upload credentials for one FILE_UPLOAD response.
/// The file bytes never pass through this service.
pub async fn sign_upload(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Json(req): Json<SignUploadRequest>,
) -> Result<Json<SignUploadResponse>, ApiError> {
    let form = forms::load(&state.s3, &state.bucket, form_id).await?;

    if !form.sharing.is_public {
        return Err(ApiError::Forbidden(
            "form is not accepting submissions".to_string(),
        ));
    }

    let field_accepts_files = form
        .fields
        .iter()
        .any(|f| f.field_id == req.field_id && f.field_type == FieldType::FileUpload);
    if !field_accepts_files {
        return Err(ApiError::BadRequest(format!(
            "field {} does not accept file uploads",
            req.field_id
        )));
    }

    let key = s3_keys::upload(form.id, Uuid::new_v4(), &safe_file_name(&req.file_name));
    let upload_url =
        uploads::presign_put(&state.s3, &state.bucket, &key, &req.content_type, UPLOAD_URL_TTL)
            .await?;

    Ok(Json(SignUploadResponse {
        url: uploads::object_url(&state.bucket, &state.region, &key),
        storage_id: key,
        upload_url,
        expires_in_secs: UPLOAD_URL_TTL.as_secs(),
    }))
}

/// Keep uploaded file names key-safe: path separators and exotic
/// characters become hyphens.
fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if cleaned.trim_matches('-').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
