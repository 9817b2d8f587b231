//! Reelwriter CLI binary.
//!
//! This binary provides command-line access to reelwriter's functionality:
//! - Validate keys and list models
//! - Run single generation steps (ideas, hooks, script, captions)
//! - Drive a full pipeline run with persisted sessions
//! - Inspect and purge sessions and history

use clap::Parser;
use reelwriter::{ReelwriterConfig, init_tracing};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Context, execute};

    // Load .env before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ReelwriterConfig::load(cli.config.as_deref())?;
    init_tracing(config.logging(), cli.verbose)?;

    let ctx = Context::new(&cli, config);
    execute(cli.command, ctx).await?;

    Ok(())
}
