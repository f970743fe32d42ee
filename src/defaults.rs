//! Default configuration constants for callscribe.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Silence gap, in seconds, that separates two utterances by the same speaker.
///
/// A pause strictly longer than 1.5 seconds between consecutive words starts a
/// new utterance; a pause of exactly 1.5 seconds does not. This is a design
/// constant tuned for conversational speech, not derived from data.
pub const GAP_THRESHOLD_SECS: f64 = 1.5;

/// Speaker role for channel 0 of a two-party call recording.
pub const AGENT_ROLE: &str = "AI Agent";

/// Speaker role for channel 1 of a two-party call recording.
pub const CUSTOMER_ROLE: &str = "Customer";

/// Default interval, in seconds, between transcription job status polls.
///
/// The engine completes jobs asynchronously; 2 seconds keeps the console
/// responsive without hammering the job API.
pub const POLL_INTERVAL_SECS: u64 = 2;

/// Expiry, in seconds, for presigned recording playback URLs.
pub const PRESIGN_EXPIRY_SECS: u64 = 3600;

/// File extension that identifies call recordings in the bucket.
pub const WAV_EXTENSION: &str = ".wav";

/// Default transcription language code.
///
/// The pipeline was built for Spanish-language call centers; pass
/// `--language en-US` for English recordings.
pub const DEFAULT_LANGUAGE: &str = "es-US";

/// Prefix for generated transcription job names.
pub const JOB_NAME_PREFIX: &str = "transcribe-";
