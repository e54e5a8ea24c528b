use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort launch. There is no fallback corpus or credential.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{0} not found in environment variables. Please set it in your .env file.")]
    MissingCredential(&'static str),

    #[error("Lore file {path} could not be read: {source}")]
    LoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lore file {0} contains no text")]
    EmptyLore(PathBuf),

    #[error("Could not index lore: {0}")]
    Indexing(#[from] GenerationError),
}

/// A single turn failed. Recovered at the UI boundary as a status message.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("API request failed (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Generation engine is not running")]
    EngineUnavailable,
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GenerationError::MalformedResponse(e.to_string())
        } else {
            GenerationError::Network(e.to_string())
        }
    }
}

/// Reading a `.dungeon` save back in.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read save file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Save file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Save file version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("Unknown maturity level '{0}'")]
    UnknownMaturity(String),

    #[error("Invalid generation parameters: {0}")]
    InvalidParameters(String),

    #[error("Transcript does not match the saved turns")]
    TranscriptMismatch,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Could not write save file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not serialize game: {0}")]
    Serialize(#[from] serde_json::Error),
}
