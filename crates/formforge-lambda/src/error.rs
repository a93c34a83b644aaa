use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use formforge_bedrock::error::GenerateError;
use formforge_core::responses::ResponseErrors;
use formforge_core::validate::SchemaViolation;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    /// Ownership mismatch — always denies, never partially applies.
    Forbidden(String),
    /// Transient contention (slug race, stat CAS exhaustion); safe to
    /// retry.
    Conflict(String),
    /// A candidate schema was rejected; carries every violation.
    SchemaRejected(Vec<SchemaViolation>),
    /// A response set was rejected; carries the field-keyed messages.
    ResponsesRejected(ResponseErrors),
    /// The generation pipeline failed with a machine-readable kind.
    Generation(GenerateError),
    Internal(String),
}

/// JSON error body. `kind` is the machine-readable discriminator for
/// generation failures; `violations`/`errors` carry the complete lists —
/// never truncated to the first failure.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<Vec<SchemaViolation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ResponseErrors>,
}

impl ErrorBody {
    fn message(error: String) -> Self {
        ErrorBody {
            error,
            kind: None,
            violations: None,
            errors: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorBody::message(msg)),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorBody::message(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::message(msg)),
            ApiError::SchemaRejected(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "form schema failed validation".to_string(),
                    kind: Some("invalid_schema"),
                    violations: Some(violations),
                    errors: None,
                },
            ),
            ApiError::ResponsesRejected(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: "submission failed validation".to_string(),
                    kind: None,
                    violations: None,
                    errors: Some(errors),
                },
            ),
            ApiError::Generation(e) => return generation_response(e),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("internal server error".to_string()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Generation failures keep their full taxonomy on the wire so the
/// caller can tell "your input was rejected" from "the system could not
/// complete the request".
fn generation_response(e: GenerateError) -> Response {
    let (status, body) = match e {
        GenerateError::ProviderUnavailable(msg) => (
            StatusCode::BAD_GATEWAY,
            ErrorBody {
                error: msg,
                kind: Some("provider_unavailable"),
                violations: None,
                errors: None,
            },
        ),
        GenerateError::MalformedOutput(msg) => (
            StatusCode::BAD_GATEWAY,
            ErrorBody {
                error: msg,
                kind: Some("malformed_output"),
                violations: None,
                errors: None,
            },
        ),
        GenerateError::InvalidSchema(violations) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorBody {
                error: "generated schema failed validation".to_string(),
                kind: Some("invalid_schema"),
                violations: Some(violations),
                errors: None,
            },
        ),
    };

    (status, Json(body)).into_response()
}

impl From<formforge_storage::error::StorageError> for ApiError {
    fn from(e: formforge_storage::error::StorageError) -> Self {
        use formforge_storage::error::StorageError;
        match e {
            StorageError::NotFound { key } => {
                ApiError::NotFound(format!("object not found: {key}"))
            }
            StorageError::SlugTaken { slug } => {
                ApiError::Conflict(format!("slug already taken: {slug}, retry the request"))
            }
            StorageError::PreconditionFailed { .. } | StorageError::StatContention { .. } => {
                ApiError::Conflict("concurrent update, retry the request".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<GenerateError> for ApiError {
    fn from(e: GenerateError) -> Self {
        ApiError::Generation(e)
    }
}

impl From<formforge_auth::error::AuthError> for ApiError {
    fn from(e: formforge_auth::error::AuthError) -> Self {
        ApiError::Unauthorized(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
