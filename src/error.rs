//! Error handling for the hirepilot application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HirePilotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed candidate data: {0}")]
    MalformedCandidates(String),

    #[error("Candidate not found: {0}")]
    CandidateNotFound(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, HirePilotError>;

/// Convert TOML parse errors to our custom error type
impl From<toml::de::Error> for HirePilotError {
    fn from(err: toml::de::Error) -> Self {
        HirePilotError::Configuration(format!("Failed to parse config: {}", err))
    }
}

/// Convert TOML serialization errors to our custom error type
impl From<toml::ser::Error> for HirePilotError {
    fn from(err: toml::ser::Error) -> Self {
        HirePilotError::Configuration(format!("Failed to serialize config: {}", err))
    }
}
