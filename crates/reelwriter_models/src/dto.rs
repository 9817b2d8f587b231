//! Provider wire formats.

use derive_builder::Builder;
use derive_getters::Getters;
use reelwriter_core::Role;
use serde::{Deserialize, Serialize};

/// Chat message in the OpenAI-compatible format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`
    role: Role,
    /// Message text
    content: String,
}

impl ChatMessage {
    /// Create a chat message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// `response_format` field of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponseFormat {
    /// `json_object`
    #[serde(rename = "type")]
    pub kind: String,
}

impl ChatResponseFormat {
    /// Ask for a single JSON object.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

/// Chat completion request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatRequest {
    /// Upstream model id
    model: String,
    /// Conversation
    messages: Vec<ChatMessage>,
    /// Requested output format
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ChatResponseFormat>,
}

impl ChatRequest {
    /// Assemble a request body.
    pub fn new(
        model: impl Into<String>,
        messages: Vec<ChatMessage>,
        response_format: Option<ChatResponseFormat>,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            response_format,
        }
    }
}

/// Message inside a chat completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatChoiceMessage {
    /// Completion text
    #[serde(default)]
    content: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// Generated message
    message: ChatChoiceMessage,
}

/// Chat completion response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatResponse {
    /// Completion choices, best first
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatResponse {
    /// Text of the top choice, if any.
    pub fn top_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// Legacy prompt-completion request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct LegacyCompletionRequest {
    /// Upstream model id
    model: String,
    /// Rendered Human/Assistant transcript
    prompt: String,
    /// Completion length cap
    #[builder(default = "1000")]
    max_tokens_to_sample: u32,
    /// Sequences that end the completion
    #[builder(default = "vec![\"\\n\\nHuman:\".to_string()]")]
    stop_sequences: Vec<String>,
}

impl LegacyCompletionRequest {
    /// Creates a new builder for `LegacyCompletionRequest`.
    pub fn builder() -> LegacyCompletionRequestBuilder {
        LegacyCompletionRequestBuilder::default()
    }
}

/// Legacy prompt-completion response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LegacyCompletionResponse {
    /// Completion text
    #[serde(default)]
    completion: Option<String>,
}
