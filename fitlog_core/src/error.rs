//! Error types for the fitlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Field validation failure; the message names the offending field(s).
    /// No state is mutated when this is returned.
    #[error("validation error: {0}")]
    Validation(String),

    /// Category outside the fixed Warm-up/Workout/Cool-down set
    #[error("invalid category: {0:?}")]
    InvalidCategory(String),

    /// Report export requires a saved profile
    #[error("no profile saved")]
    MissingProfile,

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Journal/archive persistence error
    #[error("Journal error: {0}")]
    Journal(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for recoverable caller mistakes that a web layer should map to
    /// a 400-class status rather than a server error.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::InvalidCategory(_) | Error::MissingProfile
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(Error::Validation("age".into()).is_client_error());
        assert!(Error::InvalidCategory("Cardio".into()).is_client_error());
        assert!(Error::MissingProfile.is_client_error());
        assert!(!Error::Other("boom".into()).is_client_error());
        assert!(!Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")).is_client_error());
    }
}
