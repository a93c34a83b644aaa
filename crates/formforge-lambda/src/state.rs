use std::sync::Arc;

use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_s3::Client as S3Client;
use jsonwebtoken::DecodingKey;

/// Shared application state, injected into all route handlers via Axum
/// state. Everything here is a cheap clone.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub bedrock: BedrockClient,
    pub bucket: String,
    pub region: String,
    pub model_id: String,
    pub frontend_url: String,
    pub cognito_user_pool_id: String,
    /// Pre-fetched Cognito RSA key. When absent, the function is assumed
    /// to sit behind an API Gateway JWT authorizer and claims are taken
    /// as gateway-verified.
    pub decoding_key: Option<Arc<DecodingKey>>,
}
