use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// What happened to a form or one of its submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    FormGenerated,
    FormUpdated,
    FormPublishToggled,
    FormDeleted,
    SubmissionCreated,
}

impl AuditAction {
    fn as_str(self) -> &'static str {
        match self {
            AuditAction::FormGenerated => "form.generated",
            AuditAction::FormUpdated => "form.updated",
            AuditAction::FormPublishToggled => "form.publish_toggled",
            AuditAction::FormDeleted => "form.deleted",
            AuditAction::SubmissionCreated => "submission.created",
        }
    }
}

/// One auditable action against a form. `actor` is the owner's subject,
/// or `"public"` for respondent-initiated actions.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub form_id: Uuid,
    pub actor: String,
    pub detail: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: AuditAction, form_id: Uuid, actor: impl Into<String>) -> Self {
        AuditEvent {
            action,
            form_id,
            actor: actor.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Emit this event via tracing.
    pub fn emit(&self) {
        let detail = self.detail.as_ref().map(|d| d.to_string()).unwrap_or_default();
        info!(
            audit.action = self.action.as_str(),
            audit.form_id = %self.form_id,
            audit.actor = %self.actor,
            audit.detail = %detail,
            "audit event"
        );
    }
}
