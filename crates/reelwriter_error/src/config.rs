//! Configuration errors.

/// Bad or unloadable configuration.
///
/// `setting` holds the dotted key (`generation.timeout_secs`) when the
/// failure is about one value rather than a whole source.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {}{} at line {} in {}", setting.as_deref().map(|s| format!("[{s}] ")).unwrap_or_default(), message, line, file)]
pub struct ConfigError {
    setting: Option<String>,
    message: String,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// A failure not tied to one setting.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(None, message.into())
    }

    /// An invalid value for `setting`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelwriter_error::ConfigError;
    ///
    /// let err = ConfigError::invalid("generation.timeout_secs", "must be positive");
    /// assert_eq!(err.setting(), Some("generation.timeout_secs"));
    /// assert!(err.to_string().contains("[generation.timeout_secs] must be positive"));
    /// ```
    #[track_caller]
    pub fn invalid(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Some(setting.into()), message.into())
    }

    #[track_caller]
    fn build(setting: Option<String>, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            setting,
            message,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The offending setting, if any.
    pub fn setting(&self) -> Option<&str> {
        self.setting.as_deref()
    }

    /// What went wrong.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_constructors_record_the_calling_line() {
        let (err, line) = (ConfigError::invalid("logging.level", "bad filter"), line!());
        assert_eq!(err.line, line);
        assert!(err.file.ends_with("config.rs"));

        let (err, line) = (ConfigError::new("unreadable file"), line!());
        assert_eq!(err.line, line);
        assert_eq!(err.setting(), None);
    }
}
