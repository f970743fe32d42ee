//! callscribe - operator console for call-recording transcription
//!
//! Drives a remote speech-to-text pipeline over two-party call recordings:
//! lists recordings in a remote bucket, submits asynchronous transcription
//! jobs, polls them to completion, reconstructs speaker-labeled conversation
//! transcripts from the engine's channel-separated output, and optionally
//! machine-translates the result.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod cli;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod storage;
pub mod transcript;
pub mod translate;
pub mod workflow;

// Core model (token stream → speaker-labeled conversation)
pub use transcript::{Channel, Conversation, EngineResult, Token, Utterance, assemble, segment};

// Service seams (HTTP implementations + test mocks)
pub use engine::{JobStatus, TranscriptionEngine};
pub use storage::ObjectStore;
pub use translate::Translator;

// Workflow
pub use workflow::{BatchReport, RecordingReport, WorkflowOptions, run_batch};

// Error handling
pub use error::{CallscribeError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.3.1+abc1234"` when git hash is available, `"0.3.1"` otherwise.
/// Shown by `callscribe --version`.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
