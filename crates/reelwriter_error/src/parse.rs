//! Errors raised while recovering structure from model output.

/// Specific parse failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ParseErrorKind {
    /// No JSON array could be recovered from the text
    #[display("No array found in response: {}", _0)]
    NoArray(String),
    /// Recovered text was not valid JSON
    #[display("Invalid JSON: {}", _0)]
    InvalidJson(String),
    /// A configured delimiter or label pattern failed to compile
    #[display("Invalid pattern '{}': {}", pattern, reason)]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },
}

/// Parse error with location tracking.
///
/// # Examples
///
/// ```
/// use reelwriter_error::{ParseError, ParseErrorKind};
///
/// let err = ParseError::new(ParseErrorKind::NoArray("Sorry, I can't help".into()));
/// assert!(format!("{}", err).contains("No array"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", kind, line, file)]
pub struct ParseError {
    kind: ParseErrorKind,
    line: u32,
    file: &'static str,
}

impl ParseError {
    /// Create a new parse error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ParseErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}
