use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::error::AuthError;

/// Claims extracted from a Cognito JWT.
#[derive(Debug, Deserialize)]
pub struct OwnerClaims {
    pub sub: String,
    pub iss: String,
    pub token_use: String,
    pub exp: u64,
    pub iat: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Validate a Cognito JWT against a pre-fetched public key.
///
/// Checks signature, expiry, the user-pool issuer, and that the token is
/// an access or id token.
pub fn validate_token(
    token: &str,
    decoding_key: &DecodingKey,
    user_pool_id: &str,
    region: &str,
) -> Result<OwnerClaims, AuthError> {
    let issuer = format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}");

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[&issuer]);
    validation.validate_exp = true;

    let token_data = decode::<OwnerClaims>(token, decoding_key, &validation)?;

    let token_use = &token_data.claims.token_use;
    if token_use != "access" && token_use != "id" {
        return Err(AuthError::InvalidToken(format!(
            "unexpected token_use: {token_use}"
        )));
    }

    Ok(token_data.claims)
}

/// Extract claims without signature verification.
///
/// Only for deployments behind an API Gateway JWT authorizer, which has
/// already verified the signature and expiry before the request reaches
/// the function. The issuer is still checked so a mis-routed token from
/// another pool is rejected.
pub fn claims_behind_gateway(
    token: &str,
    user_pool_id: &str,
    region: &str,
) -> Result<OwnerClaims, AuthError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AuthError::InvalidToken("not a JWT".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::InvalidToken(format!("payload decode: {e}")))?;

    let claims: OwnerClaims = serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::InvalidToken(format!("payload parse: {e}")))?;

    let issuer = format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}");
    if claims.iss != issuer {
        return Err(AuthError::InvalidToken(format!(
            "unexpected issuer: {}",
            claims.iss
        )));
    }

    Ok(claims)
}
