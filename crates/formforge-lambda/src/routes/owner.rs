use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct MeResponse {
    pub sub: String,
    pub email: Option<String>,
}

/// Who the bearer token belongs to. The email lookup needs an access
/// token; id tokens still resolve to the subject alone.
pub async fn me(
    State(_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ApiError> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let cognito = formforge_auth::client::build_client().await;
    let email = formforge_auth::client::owner_email(&cognito, token)
        .await
        .unwrap_or(None);

    Ok(Json(MeResponse {
        sub: user.sub,
        email,
    }))
}
