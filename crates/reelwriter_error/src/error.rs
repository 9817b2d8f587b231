//! Top-level error wrapper types.

use crate::{
    ConfigError, JsonError, ParseError, PersistenceError, PipelineError, ProviderError,
    ValidationError,
};

/// Every failure the generation core can report.
///
/// # Examples
///
/// ```
/// use reelwriter_error::{ReelwriterError, ReelwriterErrorKind, ProviderError};
///
/// let err: ReelwriterError = ProviderError::unavailable("google", "not wired").into();
/// assert!(matches!(err.kind(), ReelwriterErrorKind::Provider(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelwriterErrorKind {
    /// Upstream generation call failed
    #[from(ProviderError)]
    Provider(ProviderError),
    /// Model output did not have the expected structure
    #[from(ParseError)]
    Parse(ParseError),
    /// Request was missing a required field
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Store read or write failed
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Pipeline action not valid in the current state
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Reelwriter error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reelwriter_error::{ConfigError, ReelwriterResult};
///
/// fn might_fail() -> ReelwriterResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reelwriter Error: {}", _0)]
pub struct ReelwriterError(Box<ReelwriterErrorKind>);

impl ReelwriterError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelwriterErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelwriterErrorKind {
        &self.0
    }

    /// True when the failure came from a provider call.
    pub fn is_provider(&self) -> bool {
        matches!(self.kind(), ReelwriterErrorKind::Provider(_))
    }

    /// True when the request was rejected before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), ReelwriterErrorKind::Validation(_))
    }
}

impl<T> From<T> for ReelwriterError
where
    T: Into<ReelwriterErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for reelwriter operations.
pub type ReelwriterResult<T> = std::result::Result<T, ReelwriterError>;
