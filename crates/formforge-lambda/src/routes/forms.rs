use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use formforge_audit::events::{AuditAction, AuditEvent};
use formforge_bedrock::generate::{DEFAULT_TIMEOUT, generate_form_draft};
use formforge_core::models::field::FieldDefinition;
use formforge_core::models::form::{
    Form, FormCategory, FormDraft, Sharing, SubmissionStats,
};
use formforge_core::models::usage::TokenUsage;
use formforge_core::validate::validate_form_schema;
use formforge_storage::{forms, slugs};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub form: Form,
    /// The field list exactly as the model proposed it, for the builder
    /// UI to show alongside the persisted form.
    pub proposed_fields: Vec<FieldDefinition>,
    pub usage: TokenUsage,
}

/// Free text → generated, validated, persisted form (private until the
/// owner publishes it).
pub async fn generate_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    if req.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let generated = generate_form_draft(
        &state.bedrock,
        &state.model_id,
        &req.query,
        DEFAULT_TIMEOUT,
    )
    .await?;

    let form_id = Uuid::new_v4();
    let slug = slugs::allocate_and_reserve(
        &state.s3,
        &state.bucket,
        &generated.draft.form_name,
        form_id,
    )
    .await?;

    let now = jiff::Timestamp::now();
    let draft = generated.draft;
    let form = Form {
        id: form_id,
        owner_id: user.sub.clone(),
        form_name: draft.form_name,
        slug,
        description: draft.description,
        category: draft.category,
        fields: draft.fields,
        generated_prompt: Some(req.query),
        submission_stats: SubmissionStats::default(),
        sharing: Sharing {
            is_public: false,
            share_token: Some(Uuid::new_v4().simple().to_string()),
        },
        created_at: now,
        updated_at: now,
    };

    if let Err(e) = forms::save(&state.s3, &state.bucket, &form).await {
        // Don't strand the reservation if the form itself failed to land.
        let _ = slugs::release(&state.s3, &state.bucket, &form.slug).await;
        return Err(e.into());
    }

    AuditEvent::new(AuditAction::FormGenerated, form.id, &user.sub)
        .with_detail(serde_json::json!({
            "model_id": generated.model_id,
            "field_count": form.fields.len(),
            "cost_usd": generated.usage.cost_usd,
        }))
        .emit();

    Ok(Json(GenerateResponse {
        proposed_fields: form.fields.clone(),
        form,
        usage: generated.usage,
    }))
}

/// What the dashboard lists: everything but the field definitions.
#[derive(Serialize)]
pub struct FormSummary {
    pub id: Uuid,
    pub form_name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: FormCategory,
    pub field_count: usize,
    pub is_public: bool,
    pub submission_stats: SubmissionStats,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

pub async fn list_forms(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<FormSummary>>, ApiError> {
    let forms = forms::list_for_owner(&state.s3, &state.bucket, &user.sub).await?;

    let summaries = forms
        .into_iter()
        .map(|form| FormSummary {
            id: form.id,
            form_name: form.form_name,
            slug: form.slug,
            description: form.description,
            category: form.category,
            field_count: form.fields.len(),
            is_public: form.sharing.is_public,
            submission_stats: form.submission_stats,
            created_at: form.created_at,
            updated_at: form.updated_at,
        })
        .collect();

    Ok(Json(summaries))
}

pub async fn get_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Form>, ApiError> {
    let form = load_owned_form(&state, id, &user).await?;
    Ok(Json(form))
}

#[derive(Deserialize)]
pub struct UpdateFormRequest {
    pub form_name: Option<String>,
    pub description: Option<String>,
    pub fields: Option<Vec<FieldDefinition>>,
}

/// Owner edit of name, description, or the field list. An edited field
/// list is a candidate schema like any other and passes the validator
/// before anything is persisted. The slug never changes after creation.
pub async fn update_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFormRequest>,
) -> Result<Json<Form>, ApiError> {
    let mut form = load_owned_form(&state, id, &user).await?;

    let candidate = FormDraft {
        form_name: req.form_name.clone().unwrap_or_else(|| form.form_name.clone()),
        description: req.description.clone().or_else(|| form.description.clone()),
        category: form.category,
        fields: req.fields.clone().unwrap_or_else(|| form.fields.clone()),
    };
    validate_form_schema(&candidate).map_err(ApiError::SchemaRejected)?;

    form.form_name = candidate.form_name;
    form.description = candidate.description;
    form.fields = candidate.fields;
    form.updated_at = jiff::Timestamp::now();

    forms::save(&state.s3, &state.bucket, &form).await?;

    AuditEvent::new(AuditAction::FormUpdated, form.id, &user.sub).emit();

    Ok(Json(form))
}

#[derive(Serialize)]
pub struct PublishResponse {
    pub is_public: bool,
    pub public_link: String,
}

pub async fn toggle_publish(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublishResponse>, ApiError> {
    let mut form = load_owned_form(&state, id, &user).await?;

    form.toggle_public();
    form.updated_at = jiff::Timestamp::now();
    forms::save(&state.s3, &state.bucket, &form).await?;

    AuditEvent::new(AuditAction::FormPublishToggled, form.id, &user.sub)
        .with_detail(serde_json::json!({ "is_public": form.sharing.is_public }))
        .emit();

    Ok(Json(PublishResponse {
        is_public: form.sharing.is_public,
        public_link: format!("{}/forms/{}", state.frontend_url, form.slug),
    }))
}

pub async fn delete_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<()>, ApiError> {
    let form = load_owned_form(&state, id, &user).await?;

    forms::delete_cascade(&state.s3, &state.bucket, &form).await?;

    AuditEvent::new(AuditAction::FormDeleted, form.id, &user.sub).emit();

    Ok(Json(()))
}

/// Load a form and enforce ownership. Mismatches deny outright.
pub(crate) async fn load_owned_form(
    state: &AppState,
    id: Uuid,
    user: &AuthUser,
) -> Result<Form, ApiError> {
    let form = forms::load(&state.s3, &state.bucket, id).await?;
    if form.owner_id != user.sub {
        return Err(ApiError::Forbidden("not the owner of this form".to_string()));
    }
    Ok(form)
}
