//! Error types for callscribe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallscribeError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Recording store errors
    #[error("Storage request failed: {message}")]
    Storage { message: String },

    #[error("Recording not found: {key}")]
    RecordingNotFound { key: String },

    #[error("Not a valid WAV file: {path}: {message}")]
    InvalidWav { path: String, message: String },

    // Transcription job errors
    #[error("Failed to start transcription job {job_name}: {message}")]
    JobSubmit { job_name: String, message: String },

    #[error("Failed to poll transcription job {job_name}: {message}")]
    JobPoll { job_name: String, message: String },

    #[error("Transcription job {job_name} failed: {reason}")]
    JobFailed { job_name: String, reason: String },

    // Engine result shape errors
    #[error("Malformed engine result: {message}")]
    ResultShape { message: String },

    // Translation errors
    #[error("Translation failed: {message}")]
    Translation { message: String },

    // HTTP transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, CallscribeError>;
