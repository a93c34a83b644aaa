use std::env;
use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, patch, post};
use jsonwebtoken::DecodingKey;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bucket = env::var("FORMFORGE_BUCKET").unwrap_or_else(|_| "formforge".to_string());
    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
    let model_id = env::var("BEDROCK_MODEL_ID")
        .unwrap_or_else(|_| "us.anthropic.claude-sonnet-4-20250514-v1:0".to_string());
    let frontend_url =
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let cognito_user_pool_id =
        env::var("COGNITO_USER_POOL_ID").unwrap_or_else(|_| "us-east-1_placeholder".to_string());

    // Optional pre-fetched Cognito RSA key; without it, claims are
    // trusted as verified by the API Gateway JWT authorizer.
    let decoding_key = match env::var("COGNITO_RSA_PEM") {
        Ok(pem) => Some(Arc::new(
            DecodingKey::from_rsa_pem(pem.as_bytes())
                .map_err(|e| eyre::eyre!("COGNITO_RSA_PEM invalid: {e}"))?,
        )),
        Err(_) => None,
    };

    let s3 = formforge_storage::client::build_client_with_region(&region).await;
    let bedrock = formforge_bedrock::client::build_client_with_region(&region).await;

    let state = AppState {
        s3,
        bedrock,
        bucket,
        region,
        model_id,
        frontend_url,
        cognito_user_pool_id,
        decoding_key,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Respondent-facing routes: no auth.
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/public/forms/{slug}",
            get(routes::public_forms::get_public_form),
        )
        .route(
            "/forms/{id}/submissions",
            post(routes::submissions::create_submission),
        )
        .route("/forms/{id}/uploads/sign", post(routes::uploads::sign_upload));

    // Owner-facing routes, behind JWT validation.
    let protected_routes = Router::new()
        .route("/me", get(routes::owner::me))
        .route("/forms/generate", post(routes::forms::generate_form))
        .route("/forms", get(routes::forms::list_forms))
        .route("/forms/{id}", get(routes::forms::get_form))
        .route("/forms/{id}", post(routes::forms::update_form))
        .route("/forms/{id}", delete(routes::forms::delete_form))
        .route("/forms/{id}/publish", patch(routes::forms::toggle_publish))
        .route(
            "/forms/{id}/submissions",
            get(routes::submissions::list_for_form),
        )
        .route(
            "/forms/{form_id}/submissions/{submission_id}",
            get(routes::submissions::get_submission),
        )
        .route(
            "/analytics/submissions-over-time",
            get(routes::submissions::submissions_over_time),
        )
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let app = public_routes
        .merge(protected_routes)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
