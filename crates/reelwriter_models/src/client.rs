//! The provider-agnostic generation client.

use crate::anthropic::LegacyCompletionClient;
use crate::keys::{KeyValidation, model_ids};
use crate::metrics::{GenerationMetrics, classify_error};
use crate::openai_compat::OpenAICompatibleClient;
use crate::{ClientConfig, Provider, Route};
use async_trait::async_trait;
use reelwriter_core::{CompletionRequest, Credentials, ModelCatalog};
use reelwriter_error::{ConfigError, ProviderError, ReelwriterResult};
use reelwriter_interface::GenerationDriver;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Routes each completion to the adapter for its model's provider.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: Client,
    openai: OpenAICompatibleClient,
    gateway: OpenAICompatibleClient,
    anthropic: LegacyCompletionClient,
    gateway_base: String,
}

impl GenerationClient {
    /// Build a client with a shared connection pool and request timeout.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> ReelwriterResult<Self> {
        if *config.timeout_secs() == 0 {
            Err(ConfigError::invalid("generation.timeout_secs", "must be positive"))?;
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {e}")))?;
        let endpoints = config.endpoints();
        debug!(timeout_secs = config.timeout_secs(), "Creating generation client");

        Ok(Self {
            openai: OpenAICompatibleClient::new(http.clone(), endpoints.openai(), Provider::OpenAi),
            gateway: OpenAICompatibleClient::new(
                http.clone(),
                endpoints.gateway(),
                Provider::Gateway,
            ),
            anthropic: LegacyCompletionClient::new(http.clone(), endpoints.anthropic()),
            gateway_base: endpoints.gateway().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn dispatch(
        &self,
        route: &Route,
        api_key: &str,
        request: &CompletionRequest,
    ) -> ReelwriterResult<String> {
        match route.provider {
            Provider::OpenAi => {
                self.openai
                    .complete(api_key, &route.upstream_model, request)
                    .await
            }
            Provider::Gateway => {
                self.gateway
                    .complete(api_key, &route.upstream_model, request)
                    .await
            }
            Provider::Anthropic => {
                self.anthropic
                    .complete(api_key, &route.upstream_model, request)
                    .await
            }
            Provider::Google => Err(ProviderError::unavailable(
                Provider::Google.to_string(),
                "Google Gemini integration is not wired yet; choose another model",
            )
            .into()),
        }
    }

    /// Check a key against the gateway's model listing.
    ///
    /// Rejections and transport failures come back as `ok: false`.
    #[instrument(skip(self, api_key))]
    pub async fn validate_key(&self, api_key: &str) -> KeyValidation {
        let response = match self
            .http
            .get(format!("{}/models", self.gateway_base))
            .bearer_auth(api_key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Key validation request failed");
                return KeyValidation::rejected(format!("Validation request failed: {e}"));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(200).collect();
            info!(status = %status, "Gateway rejected API key");
            return KeyValidation::rejected(format!("Gateway returned {}. {}", status.as_u16(), excerpt));
        }

        match response.json::<serde_json::Value>().await {
            Ok(listing) => KeyValidation::accepted(model_ids(&listing)),
            Err(e) => {
                warn!(error = %e, "Gateway listing was not JSON");
                KeyValidation::accepted(Vec::new())
            }
        }
    }

    /// Model ids available for `provider`, in routable form.
    ///
    /// Falls back to the catalog entries for that provider when no key is
    /// given, the provider cannot list models, or the listing fails.
    #[instrument(skip(self, api_key, catalog), fields(provider = %provider))]
    pub async fn list_models(
        &self,
        provider: Provider,
        api_key: Option<&str>,
        catalog: &ModelCatalog,
    ) -> Vec<String> {
        let fallback = || {
            catalog
                .for_provider(&provider.to_string())
                .map(|model| model.id().clone())
                .collect::<Vec<_>>()
        };
        let Some(api_key) = api_key.filter(|key| !key.trim().is_empty()) else {
            return fallback();
        };

        let listing = match provider {
            Provider::OpenAi => self.openai.list_models(api_key).await,
            Provider::Gateway => self.gateway.list_models(api_key).await,
            Provider::Anthropic => self.anthropic.list_models(api_key).await,
            Provider::Google => return fallback(),
        };

        match listing {
            Ok(listing) => {
                let prefix = provider.routing_prefix().unwrap_or_default();
                let ids: Vec<String> = model_ids(&listing)
                    .into_iter()
                    .map(|id| format!("{prefix}{id}"))
                    .collect();
                if ids.is_empty() { fallback() } else { ids }
            }
            Err(e) => {
                warn!(error = %e, "Model listing failed, using catalog");
                fallback()
            }
        }
    }
}

#[async_trait]
impl GenerationDriver for GenerationClient {
    #[instrument(skip(self, credentials, request), fields(model = %credentials.model()))]
    async fn complete(
        &self,
        credentials: &Credentials,
        request: &CompletionRequest,
    ) -> ReelwriterResult<String> {
        let route = Provider::route(credentials.model());
        let provider = route.provider.to_string();
        debug!(provider = %provider, upstream_model = %route.upstream_model, "Routing completion");

        let started = Instant::now();
        let result = self
            .dispatch(&route, credentials.api_key(), request)
            .await;
        let metrics = GenerationMetrics::get();
        metrics.record_request(&provider, &route.upstream_model, started.elapsed().as_secs_f64());
        if let Err(e) = &result {
            metrics.record_error(&provider, &route.upstream_model, classify_error(e));
        }
        result
    }

    fn supports_json_mode(&self, model: &str) -> bool {
        Provider::route(model).provider.supports_json_mode()
    }
}
