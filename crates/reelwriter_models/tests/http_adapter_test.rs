//! Adapters against a local HTTP server returning canned responses.

use reelwriter_core::{CompletionRequest, Credentials};
use reelwriter_error::{
    MAX_ERROR_BODY, ProviderError, ProviderErrorKind, ReelwriterError, ReelwriterErrorKind,
};
use reelwriter_interface::GenerationDriver;
use reelwriter_models::{ClientConfigBuilder, GenerationClient, ProviderEndpointsBuilder};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Answers every request with one status and body, recording what it saw.
struct CannedServer {
    base: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    async fn start(status: u16, body: impl Into<String>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base = format!("http://{}", listener.local_addr()?);
        let body = body.into();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let _ = answer(stream, status, &body, &seen).await;
            }
        });
        Ok(Self { base, requests })
    }

    fn last_request(&self) -> String {
        self.requests.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

async fn answer(
    mut stream: TcpStream,
    status: u16,
    body: &str,
    seen: &Mutex<Vec<String>>,
) -> std::io::Result<()> {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&raw);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if raw.len() >= end + 4 + length {
                break;
            }
        }
    }

    // Recorded before replying so the client never outruns the log.
    seen.lock().unwrap().push(String::from_utf8_lossy(&raw).into_owned());

    let response = format!(
        "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn client_for(server: &CannedServer) -> anyhow::Result<GenerationClient> {
    let endpoints = ProviderEndpointsBuilder::default()
        .openai(server.base.clone())
        .anthropic(server.base.clone())
        .gateway(server.base.clone())
        .build()?;
    let config = ClientConfigBuilder::default()
        .endpoints(endpoints)
        .timeout_secs(5u64)
        .build()?;
    Ok(GenerationClient::new(config)?)
}

fn provider_error(err: &ReelwriterError) -> &ProviderError {
    match err.kind() {
        ReelwriterErrorKind::Provider(provider) => provider,
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn chat_completion_returns_top_choice_text() -> anyhow::Result<()> {
    let server = CannedServer::start(
        200,
        r#"{"choices":[{"message":{"role":"assistant","content":"Stop scrolling."}},{"message":{"content":"Second choice"}}]}"#,
    )
    .await?;
    let client = client_for(&server)?;

    let text = client
        .complete(
            &Credentials::new("sk-test", "openai/gpt-4o-mini"),
            &CompletionRequest::prompt("Write a hook"),
        )
        .await?;

    assert_eq!(text, "Stop scrolling.");
    let request = server.last_request();
    assert!(request.starts_with("POST /chat/completions"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer sk-test"));
    assert!(request.contains(r#""model":"gpt-4o-mini""#));
    Ok(())
}

#[tokio::test]
async fn legacy_completion_returns_trimmed_completion() -> anyhow::Result<()> {
    let server = CannedServer::start(200, r#"{"completion":"  Here is your script.  "}"#).await?;
    let client = client_for(&server)?;

    let text = client
        .complete(
            &Credentials::new("sk-ant-test", "anthropic/claude-3-haiku"),
            &CompletionRequest::prompt("Write a script"),
        )
        .await?;

    assert_eq!(text, "Here is your script.");
    let request = server.last_request();
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /v1/complete"));
    assert!(lower.contains("x-api-key: sk-ant-test"));
    assert!(lower.contains("anthropic-version: 2023-06-01"));
    assert!(request.contains(r#""model":"claude-3-haiku""#));
    assert!(request.contains(r"\n\nHuman:"));
    Ok(())
}

#[tokio::test]
async fn rejected_key_carries_status_and_body() -> anyhow::Result<()> {
    let server = CannedServer::start(401, r#"{"error":"invalid api key"}"#).await?;
    let client = client_for(&server)?;

    let err = client
        .complete(
            &Credentials::new("bad", "mistralai/mistral-7b-instruct:free"),
            &CompletionRequest::prompt("hi"),
        )
        .await
        .unwrap_err();

    let provider = provider_error(&err);
    assert_eq!(provider.provider, "gateway");
    assert_eq!(provider.status_code(), Some(401));
    match &provider.kind {
        ProviderErrorKind::Status { body, .. } => {
            assert_eq!(body, r#"{"error":"invalid api key"}"#)
        }
        other => panic!("unexpected kind: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn server_error_body_is_truncated() -> anyhow::Result<()> {
    let server = CannedServer::start(500, "x".repeat(2000)).await?;
    let client = client_for(&server)?;

    let err = client
        .complete(
            &Credentials::new("sk-ant-test", "anthropic/claude-3-haiku"),
            &CompletionRequest::prompt("hi"),
        )
        .await
        .unwrap_err();

    let provider = provider_error(&err);
    assert_eq!(provider.provider, "anthropic");
    assert_eq!(provider.status_code(), Some(500));
    match &provider.kind {
        ProviderErrorKind::Status { body, .. } => {
            assert_eq!(body.chars().count(), MAX_ERROR_BODY + 1);
            assert!(body.starts_with(&"x".repeat(MAX_ERROR_BODY)));
            assert!(body.ends_with('…'));
        }
        other => panic!("unexpected kind: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn empty_choice_is_malformed_not_empty_text() -> anyhow::Result<()> {
    let server = CannedServer::start(200, r#"{"choices":[{"message":{"content":"   "}}]}"#).await?;
    let client = client_for(&server)?;

    let err = client
        .complete(
            &Credentials::new("sk-test", "openai/gpt-4o"),
            &CompletionRequest::prompt("hi"),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        provider_error(&err).kind,
        ProviderErrorKind::MalformedResponse(_)
    ));
    Ok(())
}

#[tokio::test]
async fn key_validation_reports_listing_and_rejection() -> anyhow::Result<()> {
    let accepting = CannedServer::start(200, r#"{"data":[{"id":"a/one"},{"id":"b/two"}]}"#).await?;
    let validation = client_for(&accepting)?.validate_key("sk-or-test").await;
    assert!(validation.ok);
    assert_eq!(validation.message, "API key is valid.");
    assert_eq!(
        validation.models,
        Some(vec!["a/one".to_string(), "b/two".to_string()])
    );
    assert!(accepting.last_request().starts_with("GET /models"));

    let rejecting = CannedServer::start(401, "No auth credentials found").await?;
    let validation = client_for(&rejecting)?.validate_key("sk-or-bad").await;
    assert!(!validation.ok);
    assert_eq!(
        validation.message,
        "Gateway returned 401. No auth credentials found"
    );
    Ok(())
}
