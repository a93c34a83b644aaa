use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// JWT validation middleware for owner-scoped routes.
///
/// Extracts the `Authorization: Bearer <token>` header and resolves it
/// to an owner subject. With a configured decoding key the token is
/// fully validated; without one, claims are taken as already verified
/// by the API Gateway JWT authorizer in front of the function. On
/// success, inserts [`AuthUser`] into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let claims = match &state.decoding_key {
        Some(key) => formforge_auth::jwt::validate_token(
            token,
            key,
            &state.cognito_user_pool_id,
            &state.region,
        ),
        None => formforge_auth::jwt::claims_behind_gateway(
            token,
            &state.cognito_user_pool_id,
            &state.region,
        ),
    }
    .map_err(|e| {
        tracing::warn!("token rejected: {e}");
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut().insert(AuthUser { sub: claims.sub });

    Ok(next.run(req).await)
}

/// Authenticated owner extracted from JWT claims.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: String,
}
