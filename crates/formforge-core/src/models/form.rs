use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::field::FieldDefinition;

/// Broad purpose of a form, chosen by the model during generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FormCategory {
    Appointment,
    Registration,
    Order,
    Application,
    Feedback,
    Survey,
    #[default]
    Custom,
}

/// Aggregate submission counters kept on the form document itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionStats {
    pub count: u64,
    pub last_submitted_at: Option<jiff::Timestamp>,
}

/// Public-sharing state. Access is gated by `is_public` plus knowledge of
/// the slug; `share_token` is an opaque id issued once at creation and
/// never rotated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sharing {
    pub is_public: bool,
    pub share_token: Option<String>,
}

/// An unvalidated candidate schema — either AI-proposed or user-edited —
/// pending acceptance by [`crate::validate::validate_form_schema`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormDraft {
    pub form_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: FormCategory,
    pub fields: Vec<FieldDefinition>,
}

/// A persisted field schema plus sharing/ownership metadata.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Form {
    pub id: Uuid,
    /// Cognito subject of the creating user.
    pub owner_id: String,
    pub form_name: String,
    /// Globally unique, URL-safe public identifier.
    pub slug: String,
    pub description: Option<String>,
    pub category: FormCategory,
    pub fields: Vec<FieldDefinition>,
    /// The original free-text request, kept for auditability and
    /// regeneration.
    pub generated_prompt: Option<String>,
    #[serde(default)]
    pub submission_stats: SubmissionStats,
    #[serde(default)]
    pub sharing: Sharing,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Form {
    /// Flip the public-sharing flag. The share token is untouched, so
    /// toggling twice returns the form to its exact prior sharing state.
    pub fn toggle_public(&mut self) {
        self.sharing.is_public = !self.sharing.is_public;
    }
}

/// What an unauthenticated respondent sees: no owner identity, no
/// generation prompt, no counters.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PublicForm {
    pub id: Uuid,
    pub form_name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: FormCategory,
    pub fields: Vec<FieldDefinition>,
}

impl From<Form> for PublicForm {
    fn from(form: Form) -> Self {
        PublicForm {
            id: form.id,
            form_name: form.form_name,
            slug: form.slug,
            description: form.description,
            category: form.category,
            fields: form.fields,
        }
    }
}
