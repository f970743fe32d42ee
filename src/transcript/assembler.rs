//! Conversation assembly from per-channel utterances.
//!
//! Runs the segmenter once per channel, tags each utterance with a speaker
//! role derived from the channel index, interleaves all channels' utterances
//! into global chronological order, and renders speaker-prefixed lines.
//! When the engine returned no channel-separated data, falls back to the
//! plain undifferentiated transcript.

use crate::defaults::{self, GAP_THRESHOLD_SECS};
use crate::transcript::segmenter::segment;
use crate::transcript::token::Token;

/// One party's full token stream plus its channel index.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub index: u32,
    pub tokens: Vec<Token>,
}

/// The assembled transcript for one transcription job.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    /// Rendered transcript: one `"{speaker}: {text}"` line per utterance,
    /// newline-joined, or the verbatim plain transcript in fallback mode.
    pub text: String,
    /// False when the engine provided no channel separation and the plain
    /// transcript was returned without speaker attribution.
    pub has_channel_data: bool,
}

/// Resolve a channel index to a speaker role label.
///
/// Two-party calls have fixed roles for channels 0 and 1; any other index
/// gets a generic label rather than failing.
pub fn speaker_label(index: u32) -> String {
    match index {
        0 => defaults::AGENT_ROLE.to_string(),
        1 => defaults::CUSTOMER_ROLE.to_string(),
        other => format!("Channel {other}"),
    }
}

/// Assemble a conversation from channel-separated token streams.
///
/// `plain_transcript` is the engine's undifferentiated transcript, used
/// verbatim when `channels` is empty. Pure function: no I/O, no state
/// survives the call.
pub fn assemble(channels: &[Channel], plain_transcript: &str) -> Conversation {
    if channels.is_empty() {
        return Conversation {
            text: plain_transcript.to_string(),
            has_channel_data: false,
        };
    }

    let mut tagged: Vec<(f64, String)> = Vec::new();
    for channel in channels {
        let speaker = speaker_label(channel.index);
        for utterance in segment(&channel.tokens, GAP_THRESHOLD_SECS) {
            tagged.push((utterance.start_time, format!("{speaker}: {}", utterance.text)));
        }
    }

    // Stable sort: equal start times keep channel/input order.
    tagged.sort_by(|a, b| a.0.total_cmp(&b.0));

    let text = tagged
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n");

    Conversation {
        text,
        has_channel_data: true,
    }
}
