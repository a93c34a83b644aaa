use thiserror::Error;

use formforge_core::validate::SchemaViolation;

/// Why a generation attempt produced no form. None of these are retried
/// automatically — the caller decides whether to resubmit.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The model call timed out or failed in transport.
    #[error("model provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The completion was not the expected structured output.
    #[error("model output could not be parsed: {0}")]
    MalformedOutput(String),

    /// The completion parsed but the candidate schema is invalid; the
    /// full violation list is carried for the caller to surface.
    #[error("generated schema failed validation ({} violations)", .0.len())]
    InvalidSchema(Vec<SchemaViolation>),
}
