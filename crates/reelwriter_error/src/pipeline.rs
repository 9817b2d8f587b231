//! Pipeline state machine errors.

/// Pipeline failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Action is not allowed in the current stage
    #[display("Cannot {} while in stage {}", action, stage)]
    InvalidTransition {
        /// Current stage name
        stage: String,
        /// Attempted action
        action: String,
    },
    /// An artifact from an earlier stage is required but absent
    #[display("Missing artifact: {}", _0)]
    MissingArtifact(String),
    /// Script cleaned down to nothing and must be regenerated
    #[display("Generated script contained no narration")]
    EmptyScript,
    /// No credentials have been accepted yet
    #[display("No API key or model has been configured")]
    MissingCredentials,
}

/// Pipeline error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    kind: PipelineErrorKind,
    line: u32,
    file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with caller location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PipelineErrorKind {
        &self.kind
    }
}
