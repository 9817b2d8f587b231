//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reelwriter - research prompt in, hooks, script and captions out
#[derive(Parser, Debug)]
#[command(name = "reelwriter")]
#[command(about = "Generate short-form video hooks, scripts and captions with LLMs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Extra configuration file, layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Provider API key
    #[arg(long, global = true, env = "REELWRITER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model id, e.g. `openai/gpt-4o` or a gateway id
    #[arg(long, global = true, env = "REELWRITER_MODEL")]
    pub model: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the API key against the gateway
    ValidateKey,

    /// List models, live when a key is given, otherwise from the catalog
    Models {
        /// Provider family: openai, anthropic, google or gateway
        #[arg(long)]
        provider: Option<String>,
    },

    /// Rewrite a research prompt
    ImprovePrompt {
        /// Prompt to improve
        #[arg(long)]
        prompt: String,
    },

    /// Research content ideas
    Ideas {
        /// Research prompt; a built-in prompt is used when omitted
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Generate hooks for an idea
    Hooks {
        /// Idea title
        #[arg(long)]
        title: String,

        /// Idea description
        #[arg(long, default_value = "")]
        snippet: String,
    },

    /// Generate a teleprompter script
    Script {
        /// Idea title
        #[arg(long)]
        title: String,

        /// Idea description
        #[arg(long, default_value = "")]
        snippet: String,

        /// Opening hook
        #[arg(long)]
        hook: String,

        /// Strip headings, stage directions and timestamps
        #[arg(long)]
        clean: bool,
    },

    /// Generate captions for a script file
    Captions {
        /// Path to the script text
        #[arg(long)]
        script_file: PathBuf,
    },

    /// Run the whole pipeline, persisting a session
    Run {
        /// Research prompt; a built-in prompt is used when omitted
        #[arg(long)]
        prompt: Option<String>,

        /// Index of the idea to build on
        #[arg(long, default_value_t = 0)]
        idea: usize,

        /// Index of the hook to open with
        #[arg(long, default_value_t = 0)]
        hook: usize,

        /// Archive the result as a project (script plus captions)
        #[arg(long)]
        project: bool,
    },

    /// Continue a stored session to completion
    Resume {
        /// Session id
        session_id: String,

        /// Index of the hook to open with, when one is still needed
        #[arg(long, default_value_t = 0)]
        hook: usize,

        /// Archive the result as a project (script plus captions)
        #[arg(long)]
        project: bool,
    },

    /// Stored sessions
    #[command(subcommand)]
    Sessions(SessionCommands),

    /// Archived history
    #[command(subcommand)]
    History(HistoryCommands),
}

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// List sessions, newest first
    List,

    /// Show one session
    Show {
        /// Session id
        id: String,
    },

    /// Delete one session
    Delete {
        /// Session id
        id: String,
    },

    /// Delete expired sessions
    Purge,
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List entries, newest first
    List,

    /// Delete one entry
    Delete {
        /// Entry id
        id: String,
    },

    /// Delete entries older than a number of days
    Purge {
        /// Age in days; the configured retention when omitted
        #[arg(long)]
        days: Option<i64>,
    },
}
