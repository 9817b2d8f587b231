//! Provider (upstream generation call) error types.

/// Longest response body, in characters, kept on a [`ProviderError`].
pub const MAX_ERROR_BODY: usize = 512;

/// Kinds of provider failures.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ProviderErrorKind {
    /// Upstream answered with a non-success status
    #[display("HTTP {} - {}", status, body)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated to [`MAX_ERROR_BODY`] characters
        body: String,
    },
    /// Request never produced a response (connect, TLS, timeout)
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// Response arrived but did not contain a completion
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
    /// Provider integration is intentionally not wired
    #[display("Provider unavailable: {}", _0)]
    Unavailable(String),
}

/// Provider error with location tracking.
///
/// # Examples
///
/// ```
/// use reelwriter_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::status("openai", 401, "invalid api key");
/// assert_eq!(err.status_code(), Some(401));
/// assert!(format!("{}", err).contains("openai"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error ({}): {} at line {} in {}", provider, kind, line, file)]
pub struct ProviderError {
    /// Name of the provider that failed
    pub provider: String,
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new provider error with automatic location tracking.
    #[track_caller]
    pub fn new(provider: impl Into<String>, kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            provider: provider.into(),
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Non-success HTTP status, keeping at most [`MAX_ERROR_BODY`] characters of the body.
    #[track_caller]
    pub fn status(provider: impl Into<String>, status: u16, body: impl AsRef<str>) -> Self {
        let body = truncate(body.as_ref(), MAX_ERROR_BODY);
        Self::new(provider, ProviderErrorKind::Status { status, body })
    }

    /// Transport-level failure.
    #[track_caller]
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Transport(message.into()))
    }

    /// Response without usable completion text.
    #[track_caller]
    pub fn malformed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::MalformedResponse(message.into()))
    }

    /// Integration that fails fast instead of returning empty text.
    #[track_caller]
    pub fn unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Unavailable(message.into()))
    }

    /// HTTP status, when the upstream answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            ProviderErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
