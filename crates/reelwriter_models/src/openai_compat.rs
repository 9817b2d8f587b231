//! OpenAI-compatible chat completions, shared by OpenAI and the gateway.

use crate::Provider;
use crate::dto::{ChatMessage, ChatRequest, ChatResponse, ChatResponseFormat};
use crate::http::{ensure_success, transport_error};
use reelwriter_core::{CompletionRequest, ResponseFormat};
use reelwriter_error::{ProviderError, ReelwriterResult};
use reqwest::Client;
use tracing::{debug, error, instrument};

/// Client for any endpoint speaking the `/chat/completions` dialect.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    base_url: String,
    provider: Provider,
}

impl OpenAICompatibleClient {
    /// Create a client for `base_url` (without the `/chat/completions` suffix).
    pub fn new(client: Client, base_url: impl Into<String>, provider: Provider) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            provider,
        }
    }

    /// Translate a uniform request into the chat wire format.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelwriter_core::CompletionRequest;
    /// use reelwriter_models::OpenAICompatibleClient;
    ///
    /// let body = OpenAICompatibleClient::build_request(
    ///     "gpt-4o",
    ///     &CompletionRequest::prompt("hello").json(),
    /// );
    /// let json = serde_json::to_value(&body).unwrap();
    /// assert_eq!(json["model"], "gpt-4o");
    /// assert_eq!(json["messages"][0]["role"], "user");
    /// assert_eq!(json["response_format"]["type"], "json_object");
    /// ```
    pub fn build_request(model: &str, request: &CompletionRequest) -> ChatRequest {
        let messages = request
            .messages
            .iter()
            .map(|message| ChatMessage::new(message.role, message.content.clone()))
            .collect::<Vec<_>>();
        let response_format = match request.format {
            ResponseFormat::Json => Some(ChatResponseFormat::json_object()),
            ResponseFormat::Text => None,
        };
        ChatRequest::new(model, messages, response_format)
    }

    /// Send the request and return the top choice's text.
    #[instrument(skip(self, api_key, request), fields(provider = %self.provider, model = %model))]
    pub async fn complete(
        &self,
        api_key: &str,
        model: &str,
        request: &CompletionRequest,
    ) -> ReelwriterResult<String> {
        let body = Self::build_request(model, request);
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, messages = body.messages().len(), "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(self.provider, e))?;
        let response = ensure_success(self.provider, response).await?;

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat completion");
            ProviderError::malformed(self.provider.to_string(), e.to_string())
        })?;

        match parsed.top_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(ProviderError::malformed(
                self.provider.to_string(),
                "response contained no completion text",
            )
            .into()),
        }
    }

    /// `GET /models`, returning the raw listing.
    #[instrument(skip(self, api_key), fields(provider = %self.provider))]
    pub async fn list_models(&self, api_key: &str) -> ReelwriterResult<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| transport_error(self.provider, e))?;
        let response = ensure_success(self.provider, response).await?;
        response.json().await.map_err(|e| {
            ProviderError::malformed(self.provider.to_string(), e.to_string()).into()
        })
    }

    /// Provider this client reports failures as.
    pub fn provider(&self) -> Provider {
        self.provider
    }
}
