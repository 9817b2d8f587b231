//! Anthropic legacy prompt-completion adapter.

use crate::Provider;
use crate::dto::{LegacyCompletionRequest, LegacyCompletionResponse};
use crate::http::{ensure_success, transport_error};
use reelwriter_core::{CompletionRequest, Message, Role};
use reelwriter_error::{ProviderError, ReelwriterResult};
use reqwest::Client;
use tracing::{debug, error, instrument};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const HUMAN_TURN: &str = "\n\nHuman:";
const ASSISTANT_TURN: &str = "\n\nAssistant:";

/// Render a conversation as a Human/Assistant transcript.
///
/// System turns lead the transcript without a marker, and the transcript
/// always ends with an open assistant turn.
///
/// # Examples
///
/// ```
/// use reelwriter_core::Message;
/// use reelwriter_models::render_prompt;
///
/// let prompt = render_prompt(&[Message::user("Write a hook")]);
/// assert_eq!(prompt, "\n\nHuman: Write a hook\n\nAssistant:");
/// ```
pub fn render_prompt(messages: &[Message]) -> String {
    let mut prompt = String::new();
    for message in messages.iter().filter(|m| m.role == Role::System) {
        prompt.push_str(message.content.trim());
    }
    for message in messages.iter().filter(|m| m.role != Role::System) {
        let marker = match message.role {
            Role::Assistant => ASSISTANT_TURN,
            _ => HUMAN_TURN,
        };
        prompt.push_str(marker);
        prompt.push(' ');
        prompt.push_str(message.content.trim());
    }
    prompt.push_str(ASSISTANT_TURN);
    prompt
}

/// Client for Anthropic's `/v1/complete` endpoint.
#[derive(Debug, Clone)]
pub struct LegacyCompletionClient {
    client: Client,
    base_url: String,
}

impl LegacyCompletionClient {
    /// Create a client for `base_url`, e.g. `https://api.anthropic.com`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Translate a uniform request into the legacy wire format.
    pub fn build_request(
        model: &str,
        request: &CompletionRequest,
    ) -> ReelwriterResult<LegacyCompletionRequest> {
        LegacyCompletionRequest::builder()
            .model(model)
            .prompt(render_prompt(&request.messages))
            .build()
            .map_err(|e| ProviderError::malformed(Provider::Anthropic.to_string(), e.to_string()).into())
    }

    /// Send the request and return the completion text.
    #[instrument(skip(self, api_key, request), fields(model = %model))]
    pub async fn complete(
        &self,
        api_key: &str,
        model: &str,
        request: &CompletionRequest,
    ) -> ReelwriterResult<String> {
        let body = Self::build_request(model, request)?;
        let url = format!("{}/v1/complete", self.base_url);
        debug!(url = %url, "Sending legacy completion");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Anthropic, e))?;
        let response = ensure_success(Provider::Anthropic, response).await?;

        let parsed: LegacyCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Anthropic completion");
            ProviderError::malformed(Provider::Anthropic.to_string(), e.to_string())
        })?;

        match parsed.completion() {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            _ => Err(ProviderError::malformed(
                Provider::Anthropic.to_string(),
                "response contained no completion text",
            )
            .into()),
        }
    }

    /// `GET /v1/models`, returning upstream model ids.
    #[instrument(skip(self, api_key))]
    pub async fn list_models(&self, api_key: &str) -> ReelwriterResult<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Anthropic, e))?;
        let response = ensure_success(Provider::Anthropic, response).await?;
        response.json().await.map_err(|e| {
            ProviderError::malformed(Provider::Anthropic.to_string(), e.to_string()).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_turns_lead_and_transcript_ends_open() {
        let messages = vec![
            Message::user("First question"),
            Message::system("You are a scriptwriter."),
            Message {
                role: Role::Assistant,
                content: "Earlier answer".to_string(),
            },
        ];
        let prompt = render_prompt(&messages);
        assert_eq!(
            prompt,
            "You are a scriptwriter.\n\nHuman: First question\n\nAssistant: Earlier answer\n\nAssistant:"
        );
    }

    #[test]
    fn request_carries_stop_sequence_and_token_cap() {
        let body = LegacyCompletionClient::build_request(
            "claude-3-haiku",
            &CompletionRequest::prompt("hi"),
        )
        .unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-3-haiku");
        assert_eq!(json["max_tokens_to_sample"], 1000);
        assert_eq!(json["stop_sequences"][0], "\n\nHuman:");
    }
}
