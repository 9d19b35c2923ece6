use thiserror::Error;

pub type OutreachResult<T> = Result<T, OutreachError>;

/// Run-level failures. Per-directory submission failures are never raised
/// through this type; they are reported as `SubmissionResult` entries.
#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl OutreachError {
    /// True for failures caused by the caller's input rather than the system.
    pub fn is_validation(&self) -> bool {
        matches!(self, OutreachError::Validation(_))
    }
}

impl From<config::ConfigError> for OutreachError {
    fn from(err: config::ConfigError) -> Self {
        OutreachError::Config(err.to_string())
    }
}
