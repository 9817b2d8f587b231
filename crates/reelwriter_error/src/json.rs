//! Output encoding failures.

/// A value could not be rendered as JSON.
///
/// `subject` names what was being encoded, e.g. `"command output"`.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Could not encode {} as JSON: {} (line {} in {})", subject, message, line, file)]
pub struct JsonError {
    subject: String,
    message: String,
    line: u32,
    file: &'static str,
}

impl JsonError {
    /// Record an encoding failure for `subject`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelwriter_error::JsonError;
    ///
    /// let err = JsonError::new("session listing", "key must be a string");
    /// assert_eq!(err.subject(), "session listing");
    /// assert!(err.to_string().contains("key must be a string"));
    /// ```
    #[track_caller]
    pub fn new(subject: impl Into<String>, message: impl std::fmt::Display) -> Self {
        let location = std::panic::Location::caller();
        Self {
            subject: subject.into(),
            message: message.to_string(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// What was being encoded.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The serializer's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
