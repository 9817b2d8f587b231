//! LLM provider routing and adapters for reelwriter.
//!
//! [`GenerationClient`] is the single entry point. It routes a model id to a
//! [`Provider`] once, through the pure [`Provider::route`] function, and
//! dispatches to the matching adapter:
//!
//! - **OpenAI** and the default **gateway** share [`OpenAICompatibleClient`]
//! - **Anthropic** uses the legacy prompt-completion API ([`LegacyCompletionClient`])
//! - **Google** fails fast until an integration is wired
//!
//! ```no_run
//! use reelwriter_core::{CompletionRequest, Credentials};
//! use reelwriter_interface::GenerationDriver;
//! use reelwriter_models::{ClientConfig, GenerationClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GenerationClient::new(ClientConfig::default())?;
//! let credentials = Credentials::new("sk-...", "openai/gpt-4o");
//! let text = client
//!     .complete(&credentials, &CompletionRequest::prompt("Say hi"))
//!     .await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anthropic;
mod client;
mod config;
mod dto;
mod http;
mod keys;
mod metrics;
mod openai_compat;
mod provider;

pub use anthropic::{LegacyCompletionClient, render_prompt};
pub use client::GenerationClient;
pub use config::{ClientConfig, ClientConfigBuilder, ProviderEndpoints, ProviderEndpointsBuilder};
pub use dto::{
    ChatChoice, ChatChoiceMessage, ChatMessage, ChatRequest, ChatResponse, ChatResponseFormat, LegacyCompletionRequest,
    LegacyCompletionResponse,
};
pub use keys::{KeyValidation, model_ids};
pub use metrics::{GenerationMetrics, classify_error};
pub use openai_compat::OpenAICompatibleClient;
pub use provider::{Provider, Route};
