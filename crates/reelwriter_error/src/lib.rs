//! Error types for the reelwriter generation core.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! The taxonomy mirrors how failures are handled by the pipeline:
//! [`ProviderError`] and [`ValidationError`] are surfaced to the caller,
//! [`ParseError`] propagates only for idea lists, and [`PersistenceError`]
//! is logged and absorbed.
//!
//! # Examples
//!
//! ```
//! use reelwriter_error::{ReelwriterResult, ValidationError, ValidationErrorKind};
//!
//! fn require_prompt(prompt: &str) -> ReelwriterResult<&str> {
//!     if prompt.trim().is_empty() {
//!         Err(ValidationError::new(ValidationErrorKind::MissingField("prompt".into())))?
//!     }
//!     Ok(prompt)
//! }
//!
//! assert!(require_prompt("  ").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod parse;
mod persistence;
mod pipeline;
mod provider;
mod validation;

pub use config::ConfigError;
pub use error::{ReelwriterError, ReelwriterErrorKind, ReelwriterResult};
pub use json::JsonError;
pub use parse::{ParseError, ParseErrorKind};
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use provider::{MAX_ERROR_BODY, ProviderError, ProviderErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
