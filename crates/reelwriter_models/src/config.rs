//! Client configuration.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Base URLs for each provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ProviderEndpoints {
    /// OpenAI API base, e.g. `https://api.openai.com/v1`
    openai: String,
    /// Anthropic API base, e.g. `https://api.anthropic.com`
    anthropic: String,
    /// Gateway API base, e.g. `https://openrouter.ai/api/v1`
    gateway: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            openai: "https://api.openai.com/v1".to_string(),
            anthropic: "https://api.anthropic.com".to_string(),
            gateway: "https://openrouter.ai/api/v1".to_string(),
        }
    }
}

/// Settings for [`GenerationClient`](crate::GenerationClient).
///
/// # Examples
///
/// ```
/// use reelwriter_models::ClientConfigBuilder;
///
/// let config = ClientConfigBuilder::default()
///     .timeout_secs(30u64)
///     .build()
///     .unwrap();
/// assert_eq!(*config.timeout_secs(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ClientConfig {
    /// Provider base URLs
    endpoints: ProviderEndpoints,
    /// Upper bound on a single provider call
    timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: ProviderEndpoints::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
