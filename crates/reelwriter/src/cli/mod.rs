//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the reelwriter binary.

mod commands;
mod generate;
mod records;
mod run;

pub use commands::{Cli, Commands};

use reelwriter::{
    Credentials, FileSystemBackend, GenerationClient, GenerationService, HistoryStore, JsonError,
    ReelwriterConfig, ReelwriterResult, SessionStore, ValidationError,
};
use serde::Serialize;
use std::sync::Arc;

/// Settings shared by every command.
pub struct Context {
    config: ReelwriterConfig,
    api_key: Option<String>,
    model: String,
}

impl Context {
    /// Combine parsed flags with loaded configuration.
    pub fn new(cli: &Cli, config: ReelwriterConfig) -> Self {
        let model = cli
            .model
            .clone()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| config.generation().default_model().clone());
        Self {
            api_key: cli.api_key.clone(),
            model,
            config,
        }
    }

    fn config(&self) -> &ReelwriterConfig {
        &self.config
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    fn credentials(&self) -> ReelwriterResult<Credentials> {
        let api_key = self.api_key().ok_or_else(|| ValidationError::missing("apiKey"))?;
        Ok(Credentials::new(api_key, &self.model))
    }

    fn client(&self) -> ReelwriterResult<GenerationClient> {
        GenerationClient::new(self.config.client_config()?)
    }

    fn service(&self) -> ReelwriterResult<GenerationService> {
        Ok(GenerationService::new(Arc::new(self.client()?))
            .with_caption_parser(self.config.caption_parser()?))
    }

    fn sessions(&self) -> ReelwriterResult<SessionStore> {
        let backend = FileSystemBackend::new(self.config.storage().sessions_dir())?;
        Ok(SessionStore::new(Arc::new(backend)))
    }

    fn history(&self) -> ReelwriterResult<HistoryStore> {
        let backend = FileSystemBackend::new(self.config.storage().history_dir())?;
        Ok(HistoryStore::new(Arc::new(backend)))
    }
}

/// Run one command.
pub async fn execute(command: Commands, ctx: Context) -> ReelwriterResult<()> {
    match command {
        Commands::ValidateKey => generate::validate_key(&ctx).await,
        Commands::Models { provider } => generate::models(&ctx, provider.as_deref()).await,
        Commands::ImprovePrompt { prompt } => generate::improve_prompt(&ctx, prompt).await,
        Commands::Ideas { prompt } => generate::ideas(&ctx, prompt).await,
        Commands::Hooks { title, snippet } => generate::hooks(&ctx, title, snippet).await,
        Commands::Script {
            title,
            snippet,
            hook,
            clean,
        } => generate::script(&ctx, title, snippet, hook, clean).await,
        Commands::Captions { script_file } => generate::captions(&ctx, &script_file).await,
        Commands::Run {
            prompt,
            idea,
            hook,
            project,
        } => {
            run::run(
                &ctx,
                run::Choices {
                    prompt,
                    idea,
                    hook,
                    project,
                },
            )
            .await
        }
        Commands::Resume {
            session_id,
            hook,
            project,
        } => {
            run::resume(
                &ctx,
                &session_id,
                run::Choices {
                    prompt: None,
                    idea: 0,
                    hook,
                    project,
                },
            )
            .await
        }
        Commands::Sessions(cmd) => records::sessions(&ctx, cmd).await,
        Commands::History(cmd) => records::history(&ctx, cmd).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> ReelwriterResult<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| JsonError::new("command output", e))?;
    println!("{json}");
    Ok(())
}
