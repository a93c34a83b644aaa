use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Extension, Json};
use jiff::ToSpan;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use formforge_audit::events::{AuditAction, AuditEvent};
use formforge_core::models::submission::{Submission, SubmissionMetadata, UploadedFile};
use formforge_core::responses::validate_responses;
use formforge_storage::{forms, submissions};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::routes::forms::load_owned_form;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub responses: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub submitter_email: Option<String>,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(default)]
    pub time_spent: Option<u64>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub submission_id: Uuid,
}

/// Accept one public submission against a form's schema.
///
/// The response set is validated in full before anything is persisted;
/// a schema-violating set comes back as a 422 with every field-keyed
/// message. On acceptance the submission lands first, then the form's
/// stats are bumped atomically.
pub async fn create_submission(
    State(state): State<AppState>,
    Path(form_id): Path<Uuid>,
    headers: HeaderMap,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let form = match forms::load(&state.s3, &state.bucket, form_id).await {
        Ok(form) => form,
        Err(formforge_storage::error::StorageError::NotFound { .. }) => {
            return Err(ApiError::NotFound("form not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    if !form.sharing.is_public {
        return Err(ApiError::Forbidden(
            "form is not accepting submissions".to_string(),
        ));
    }

    let errors = validate_responses(&form.fields, &req.responses);
    if !errors.is_empty() {
        return Err(ApiError::ResponsesRejected(errors));
    }

    let submitted_at = jiff::Timestamp::now();
    let submission = Submission {
        id: Uuid::new_v4(),
        form_id: form.id,
        submitter_email: req.submitter_email,
        responses: req.responses,
        uploaded_files: req.uploaded_files,
        metadata: SubmissionMetadata {
            ip_address: header_value(&headers, "x-forwarded-for")
                .map(|v| v.split(',').next().unwrap_or(&v).trim().to_string()),
            user_agent: header_value(&headers, "user-agent"),
            time_spent: req.time_spent,
        },
        submitted_at,
    };

    submissions::save(&state.s3, &state.bucket, &submission).await?;
    forms::record_submission(&state.s3, &state.bucket, form.id, submitted_at).await?;

    AuditEvent::new(AuditAction::SubmissionCreated, form.id, "public")
        .with_detail(serde_json::json!({ "submission_id": submission.id }))
        .emit();

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            submission_id: submission.id,
        }),
    ))
}

pub async fn list_for_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(form_id): Path<Uuid>,
) -> Result<Json<Vec<Submission>>, ApiError> {
    let form = load_owned_form(&state, form_id, &user).await?;
    let submissions = submissions::list_for_form(&state.s3, &state.bucket, form.id).await?;
    Ok(Json(submissions))
}

pub async fn get_submission(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((form_id, submission_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Submission>, ApiError> {
    let form = load_owned_form(&state, form_id, &user).await?;
    let submission =
        submissions::load(&state.s3, &state.bucket, form.id, submission_id).await?;
    Ok(Json(submission))
}

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default = "default_days")]
    pub days: u16,
}

fn default_days() -> u16 {
    30
}

#[derive(Serialize)]
pub struct DayCount {
    pub date: String,
    pub count: u64,
}

#[derive(Serialize)]
pub struct AnalyticsResponse {
    pub submissions: Vec<DayCount>,
    pub total_submissions: u64,
    pub period_days: u16,
}

/// Per-day submission counts over the last `days` days across all the
/// owner's forms. Every day in the window appears, zero-filled, so the
/// chart collaborator never has to interpolate gaps.
pub async fn submissions_over_time(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let days = query.days.clamp(1, 365);
    let today = jiff::Timestamp::now().to_zoned(TimeZone::UTC).date();

    let mut by_date: BTreeMap<jiff::civil::Date, u64> = BTreeMap::new();
    for offset in 0..days {
        let date = today.saturating_sub(((days - 1 - offset) as i64).days());
        by_date.insert(date, 0);
    }

    let mut total = 0u64;
    let owned = forms::list_for_owner(&state.s3, &state.bucket, &user.sub).await?;
    for form in &owned {
        for submission in
            submissions::list_for_form(&state.s3, &state.bucket, form.id).await?
        {
            let date = submission.submitted_at.to_zoned(TimeZone::UTC).date();
            if let Some(count) = by_date.get_mut(&date) {
                *count += 1;
                total += 1;
            }
        }
    }

    let submissions = by_date
        .into_iter()
        .map(|(date, count)| DayCount {
            date: date.to_string(),
            count,
        })
        .collect();

    Ok(Json(AnalyticsResponse {
        submissions,
        total_submissions: total,
        period_days: days,
    }))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
