//! Reelwriter: research prompt in, short-form video kit out.
//!
//! A run goes through five stages: pick an idea, choose a hook, draft a
//! teleprompter script, generate social captions, and archive the result.
//! Each stage calls an LLM through a provider-agnostic client.
//!
//! # Architecture
//!
//! Reelwriter is organized as a workspace with focused crates:
//!
//! - `reelwriter_error` - Error types
//! - `reelwriter_core` - Data model (ideas, scripts, captions, sessions)
//! - `reelwriter_interface` - Driver, persistence and feed traits
//! - `reelwriter_models` - Provider routing and HTTP adapters
//! - `reelwriter_parsing` - Response parsing and script cleaning
//! - `reelwriter_storage` - Session and history stores
//! - `reelwriter_pipeline` - Generation operations and the stage controller
//!
//! This crate re-exports everything for convenience and adds layered
//! configuration and logging setup for the `reelwriter` binary.
//!
//! ```no_run
//! use reelwriter::{GenerationClient, GenerationService, ReelwriterConfig};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReelwriterConfig::load(None)?;
//! let client = GenerationClient::new(config.client_config()?)?;
//! let service = GenerationService::new(Arc::new(client))
//!     .with_caption_parser(config.caption_parser()?);
//! # let _ = service;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod telemetry;

pub use config::{
    CaptionSettings, GenerationSettings, LoggingSettings, ReelwriterConfig, StorageSettings,
};
pub use telemetry::init_tracing;

pub use reelwriter_core::*;
pub use reelwriter_error::*;
pub use reelwriter_interface::*;
pub use reelwriter_models::*;
pub use reelwriter_parsing::*;
pub use reelwriter_pipeline::*;
pub use reelwriter_storage::*;
