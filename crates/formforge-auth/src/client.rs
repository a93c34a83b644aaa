use aws_sdk_cognitoidentityprovider::Client;

use crate::error::AuthError;

/// Build a Cognito Identity Provider client from the default AWS config.
pub async fn build_client() -> Client {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    Client::new(&config)
}

/// Look up the email attribute for an owner by access token. Used for
/// display next to their forms; absence is not an error.
pub async fn owner_email(client: &Client, access_token: &str) -> Result<Option<String>, AuthError> {
    let resp = client
        .get_user()
        .access_token(access_token)
        .send()
        .await
        .map_err(|e| AuthError::Cognito(e.into_service_error().to_string()))?;

    Ok(resp
        .user_attributes()
        .iter()
        .find(|a| a.name() == "email")
        .and_then(|a| a.value().map(String::from)))
}
