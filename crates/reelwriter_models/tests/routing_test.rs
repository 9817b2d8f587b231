use reelwriter_core::{CompletionRequest, Credentials, ModelCatalog, ModelOption};
use reelwriter_error::{ProviderErrorKind, ReelwriterErrorKind};
use reelwriter_interface::GenerationDriver;
use reelwriter_models::{
    ClientConfigBuilder, GenerationClient, OpenAICompatibleClient, Provider,
    ProviderEndpointsBuilder,
};

#[test]
fn routes_each_prefix_to_its_adapter() {
    let cases = [
        ("openai/gpt-4o", Provider::OpenAi, "gpt-4o"),
        ("anthropic/claude-3-haiku", Provider::Anthropic, "claude-3-haiku"),
        ("google/gemini-1.5-flash", Provider::Google, "gemini-1.5-flash"),
        (
            "mistralai/mistral-7b-instruct:free",
            Provider::Gateway,
            "mistralai/mistral-7b-instruct:free",
        ),
    ];

    for (model, provider, upstream) in cases {
        let route = Provider::route(model);
        assert_eq!(route.provider, provider, "provider for {model}");
        assert_eq!(route.upstream_model, upstream, "upstream model for {model}");
    }
}

#[test]
fn unprefixed_models_go_to_the_gateway() {
    let route = Provider::route("gpt-4o");
    assert_eq!(route.provider, Provider::Gateway);
    assert_eq!(route.upstream_model, "gpt-4o");
}

#[test]
fn prefix_matching_ignores_case() {
    assert_eq!(Provider::route("OpenAI/gpt-4o").provider, Provider::OpenAi);
}

#[test]
fn stripped_model_reaches_the_wire_body() {
    let route = Provider::route("openai/gpt-4o-mini");
    let body = OpenAICompatibleClient::build_request(
        &route.upstream_model,
        &CompletionRequest::prompt("hello"),
    );
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["model"], "gpt-4o-mini");
    assert!(json.get("response_format").is_none());
}

fn unreachable_client() -> GenerationClient {
    let endpoints = ProviderEndpointsBuilder::default()
        .openai("http://127.0.0.1:9")
        .anthropic("http://127.0.0.1:9")
        .gateway("http://127.0.0.1:9")
        .build()
        .unwrap();
    let config = ClientConfigBuilder::default()
        .endpoints(endpoints)
        .timeout_secs(2u64)
        .build()
        .unwrap();
    GenerationClient::new(config).unwrap()
}

#[tokio::test]
async fn google_fails_fast_as_unavailable() {
    let client = unreachable_client();
    let creds = Credentials::new("key", "google/gemini-1.5-flash");

    let err = client
        .complete(&creds, &CompletionRequest::prompt("hi"))
        .await
        .unwrap_err();

    match err.kind() {
        ReelwriterErrorKind::Provider(provider) => {
            assert_eq!(provider.provider, "google");
            assert!(matches!(provider.kind, ProviderErrorKind::Unavailable(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn transport_failures_name_the_provider() {
    let client = unreachable_client();
    let creds = Credentials::new("key", "anthropic/claude-3-haiku");

    let err = client
        .complete(&creds, &CompletionRequest::prompt("hi"))
        .await
        .unwrap_err();

    match err.kind() {
        ReelwriterErrorKind::Provider(provider) => {
            assert_eq!(provider.provider, "anthropic");
            assert!(matches!(provider.kind, ProviderErrorKind::Transport(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_gateway_rejects_key_without_error() {
    let validation = unreachable_client().validate_key("sk-or-test").await;
    assert!(!validation.ok);
    assert!(validation.models.is_none());
}

#[tokio::test]
async fn model_listing_falls_back_to_catalog() {
    let catalog = ModelCatalog::new(vec![
        ModelOption::new("openai/gpt-4o", "GPT-4o", "openai", false),
        ModelOption::new("mistralai/mistral-7b-instruct:free", "Mistral 7B", "gateway", true),
    ]);
    let client = unreachable_client();

    let without_key = client.list_models(Provider::OpenAi, None, &catalog).await;
    assert_eq!(without_key, vec!["openai/gpt-4o"]);

    let failed_listing = client
        .list_models(Provider::Gateway, Some("key"), &catalog)
        .await;
    assert_eq!(failed_listing, vec!["mistralai/mistral-7b-instruct:free"]);
}

#[test]
fn json_mode_follows_the_route() {
    let client = unreachable_client();
    assert!(client.supports_json_mode("openai/gpt-4o"));
    assert!(client.supports_json_mode("mistralai/mistral-7b-instruct:free"));
    assert!(!client.supports_json_mode("anthropic/claude-3-haiku"));
}

#[test]
fn zero_timeout_is_rejected() {
    let config = ClientConfigBuilder::default()
        .timeout_secs(0u64)
        .build()
        .unwrap();
    assert!(GenerationClient::new(config).is_err());
}
