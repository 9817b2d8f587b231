//! Provider-agnostic completion requests.

use crate::Message;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Output shape requested from the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Free-form text
    #[default]
    Text,
    /// A single JSON object, when the provider can enforce it
    Json,
}

/// Ordered conversation to complete, plus the requested output shape.
///
/// # Examples
///
/// ```
/// use reelwriter_core::{CompletionRequest, ResponseFormat};
///
/// let request = CompletionRequest::prompt("Suggest five video ideas about Rust");
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.format, ResponseFormat::Text);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Requested output shape
    #[builder(default)]
    pub format: ResponseFormat,
}

impl CompletionRequest {
    /// A request holding a single user turn.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(text)],
            format: ResponseFormat::Text,
        }
    }

    /// Same request, asking for JSON output.
    pub fn json(mut self) -> Self {
        self.format = ResponseFormat::Json;
        self
    }
}
