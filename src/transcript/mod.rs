//! Conversation transcript reconstruction.
//!
//! Turns the engine's raw, channel-separated, word-and-punctuation-level
//! output into ordered, speaker-labeled utterances:
//!
//! raw result JSON → [`result::EngineResult`] → per-channel token streams →
//! [`segmenter::segment`] → per-channel utterances →
//! [`assembler::assemble`] → rendered conversation.
//!
//! Everything here is a pure function of its input; no state survives a call.

pub mod assembler;
pub mod result;
pub mod segmenter;
pub mod token;

pub use assembler::{Channel, Conversation, assemble, speaker_label};
pub use result::EngineResult;
pub use segmenter::segment;
pub use token::{Token, Utterance};
