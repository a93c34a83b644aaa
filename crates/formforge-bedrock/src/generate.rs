//! Free text → validated candidate schema.
//!
//! One blocking Converse request with a bounded timeout, then a strict
//! parse of the completion into a [`FormDraft`], then schema validation.
//! No step is retried here — a retry would double-bill the provider, so
//! that decision belongs to the caller.

use std::time::Duration;

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use formforge_core::models::form::FormDraft;
use formforge_core::models::usage::TokenUsage;
use formforge_core::validate::validate_form_schema;

use crate::error::GenerateError;
use crate::prompt;
use crate::tokens;

/// Upper bound on one Converse round trip. On expiry the generation
/// fails cleanly and nothing is persisted.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A validated candidate schema plus what producing it cost.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDraft {
    pub request_id: Uuid,
    pub draft: FormDraft,
    pub model_id: String,
    pub usage: TokenUsage,
}

/// Run the generation pipeline for one free-text request.
pub async fn generate_form_draft(
    client: &Client,
    model_id: &str,
    query: &str,
    timeout: Duration,
) -> Result<GeneratedDraft, GenerateError> {
    let request_id = Uuid::new_v4();
    info!(request_id = %request_id, model = model_id, "starting form generation");

    let (response_text, usage) = invoke_converse(client, model_id, query, timeout).await?;

    let draft = draft_from_response_text(&response_text)?;

    info!(
        request_id = %request_id,
        field_count = draft.fields.len(),
        input_tokens = usage.tokens.input,
        output_tokens = usage.tokens.output,
        cost_usd = usage.cost_usd,
        "form generation complete"
    );

    Ok(GeneratedDraft {
        request_id,
        draft,
        model_id: model_id.to_string(),
        usage,
    })
}

/// Parse a completion into a candidate schema and validate it.
///
/// The completion may arrive wrapped in a markdown code fence; the JSON
/// body itself is parsed strictly — missing or malformed keys are a
/// [`GenerateError::MalformedOutput`], never silently repaired.
pub fn draft_from_response_text(text: &str) -> Result<FormDraft, GenerateError> {
    let json = extract_json_object(text)
        .ok_or_else(|| GenerateError::MalformedOutput("no JSON object in completion".to_string()))?;

    let draft: FormDraft = serde_json::from_str(json)
        .map_err(|e| GenerateError::MalformedOutput(e.to_string()))?;

    validate_form_schema(&draft).map_err(GenerateError::InvalidSchema)?;

    Ok(draft)
}

/// Core invocation using the Bedrock Converse API.
/// Returns the response text and token usage.
async fn invoke_converse(
    client: &Client,
    model_id: &str,
    query: &str,
    timeout: Duration,
) -> Result<(String, TokenUsage), GenerateError> {
    let message = Message::builder()
        .role(ConversationRole::User)
        .content(ContentBlock::Text(prompt::build_user_message(query)))
        .build()
        .map_err(|e| GenerateError::ProviderUnavailable(e.to_string()))?;

    let request = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(
            prompt::GENERATION_SYSTEM_PROMPT.to_string(),
        ))
        .messages(message)
        .send();

    let response = tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| {
            GenerateError::ProviderUnavailable(format!(
                "model call timed out after {}s",
                timeout.as_secs()
            ))
        })?
        .map_err(|e| GenerateError::ProviderUnavailable(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| GenerateError::MalformedOutput("no message in response".to_string()))?;

    let response_text = output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    let usage = response
        .usage()
        .map(|u| {
            let count = tokens::extract_token_count(u);
            match tokens::pricing_for(model_id) {
                Some(pricing) => count.priced(pricing),
                None => TokenUsage {
                    tokens: count,
                    cost_usd: 0.0,
                },
            }
        })
        .unwrap_or_default();

    Ok((response_text, usage))
}

/// Slice out the outermost JSON object, tolerating markdown fences and
/// prose around it.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}
