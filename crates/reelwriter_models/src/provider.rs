//! Provider routing.

use serde::{Deserialize, Serialize};

/// Provider family behind a model id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// `openai/...`
    #[display("openai")]
    OpenAi,
    /// `anthropic/...`
    #[display("anthropic")]
    Anthropic,
    /// `google/...`
    #[display("google")]
    Google,
    /// Anything else, sent to the multi-model gateway
    #[display("gateway")]
    Gateway,
}

/// Result of routing a model id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Adapter to use
    pub provider: Provider,
    /// Model id to send upstream
    pub upstream_model: String,
}

impl Provider {
    /// Select the provider from the first path segment of `model`.
    ///
    /// The routing prefix is stripped for direct providers. Gateway ids are
    /// vendor-qualified on the gateway's side and pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelwriter_models::Provider;
    ///
    /// let route = Provider::route("anthropic/claude-3-haiku");
    /// assert_eq!(route.provider, Provider::Anthropic);
    /// assert_eq!(route.upstream_model, "claude-3-haiku");
    ///
    /// let route = Provider::route("mistralai/mistral-7b-instruct:free");
    /// assert_eq!(route.provider, Provider::Gateway);
    /// assert_eq!(route.upstream_model, "mistralai/mistral-7b-instruct:free");
    /// ```
    pub fn route(model: &str) -> Route {
        let model = model.trim();
        let direct = model.split_once('/').and_then(|(prefix, rest)| {
            let provider = match prefix.to_ascii_lowercase().as_str() {
                "openai" => Provider::OpenAi,
                "anthropic" => Provider::Anthropic,
                "google" => Provider::Google,
                _ => return None,
            };
            Some(Route {
                provider,
                upstream_model: rest.to_string(),
            })
        });

        direct.unwrap_or_else(|| Route {
            provider: Provider::Gateway,
            upstream_model: model.to_string(),
        })
    }

    /// Parse a provider family name as used in configuration.
    pub fn from_name(name: &str) -> Option<Provider> {
        match name.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Provider::OpenAi),
            "anthropic" => Some(Provider::Anthropic),
            "google" => Some(Provider::Google),
            "gateway" | "openrouter" => Some(Provider::Gateway),
            _ => None,
        }
    }

    /// Prefix re-attached to upstream ids so they route back to this provider.
    pub fn routing_prefix(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("openai/"),
            Provider::Anthropic => Some("anthropic/"),
            Provider::Google => Some("google/"),
            Provider::Gateway => None,
        }
    }

    /// Whether the adapter can request a JSON object response.
    pub fn supports_json_mode(self) -> bool {
        matches!(self, Provider::OpenAi | Provider::Gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_provider_name_parses_back() {
        for provider in Provider::iter() {
            assert_eq!(Provider::from_name(&provider.to_string()), Some(provider));
        }
    }

    #[test]
    fn prefixed_ids_route_back_to_their_provider() {
        for provider in Provider::iter() {
            if let Some(prefix) = provider.routing_prefix() {
                let route = Provider::route(&format!("{prefix}some-model"));
                assert_eq!(route.provider, provider);
                assert_eq!(route.upstream_model, "some-model");
            }
        }
    }
}
