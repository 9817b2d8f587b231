//! Live calls against real providers. Run with `--features api`.

use reelwriter_core::{CompletionRequest, Credentials};
use reelwriter_interface::GenerationDriver;
use reelwriter_models::{ClientConfig, GenerationClient};

fn gateway_key() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var("OPENROUTER_API_KEY").ok()
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn gateway_key_validates() -> anyhow::Result<()> {
    let Some(key) = gateway_key() else {
        return Ok(());
    };
    let client = GenerationClient::new(ClientConfig::default())?;
    let validation = client.validate_key(&key).await;
    assert!(validation.ok, "{}", validation.message);
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn gateway_completes_a_prompt() -> anyhow::Result<()> {
    let Some(key) = gateway_key() else {
        return Ok(());
    };
    let client = GenerationClient::new(ClientConfig::default())?;
    let creds = Credentials::new(key, "mistralai/mistral-7b-instruct:free");
    let text = client
        .complete(&creds, &CompletionRequest::prompt("Reply with the word ok."))
        .await?;
    assert!(!text.trim().is_empty());
    Ok(())
}
