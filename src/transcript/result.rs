//! Wire model of the transcription engine's result document.
//!
//! The engine delivers a JSON document with the plain transcript under
//! `results.transcripts` and, when channel identification was enabled, a
//! `results.channel_labels` structure with per-channel item streams. Items
//! are `"pronunciation"` (a word, with start/end times as numeric strings)
//! or `"punctuation"` (no timing). This module deserializes that document
//! and converts it into the domain `Channel`/`Token` model.

use crate::error::{CallscribeError, Result};
use crate::transcript::assembler::Channel;
use crate::transcript::token::Token;
use serde::Deserialize;

/// Top-level engine result document.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineResult {
    pub results: EngineResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineResults {
    /// The plain, undifferentiated transcript. The engine always emits
    /// exactly one entry here; its absence is a contract violation.
    #[serde(default)]
    pub transcripts: Vec<EngineTranscript>,

    /// Channel-separated item streams. Absent when channel identification
    /// was not enabled or the engine could not separate the audio.
    pub channel_labels: Option<EngineChannelLabels>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineTranscript {
    pub transcript: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineChannelLabels {
    #[serde(default)]
    pub channels: Vec<EngineChannel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineChannel {
    /// Engine convention: `"ch_0"`, `"ch_1"`, ...
    pub channel_label: String,
    #[serde(default)]
    pub items: Vec<EngineItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineItem {
    #[serde(rename = "type")]
    pub item_type: String,
    /// Present only on pronunciation items, as a numeric string.
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub alternatives: Vec<EngineAlternative>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineAlternative {
    pub content: String,
}

impl EngineResult {
    /// Parse a raw result document from JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| CallscribeError::ResultShape {
            message: e.to_string(),
        })
    }

    /// The engine's plain transcript text.
    ///
    /// Errors when `results.transcripts` is empty; the engine contract
    /// guarantees one entry and its absence means the document is malformed.
    pub fn plain_transcript(&self) -> Result<&str> {
        self.results
            .transcripts
            .first()
            .map(|t| t.transcript.as_str())
            .ok_or_else(|| CallscribeError::ResultShape {
                message: "missing results.transcripts".to_string(),
            })
    }

    /// Convert the channel-labeled item streams into domain channels.
    ///
    /// Returns an empty vec when the document carries no channel data.
    pub fn channels(&self) -> Result<Vec<Channel>> {
        let Some(labels) = &self.results.channel_labels else {
            return Ok(Vec::new());
        };

        labels
            .channels
            .iter()
            .map(|channel| {
                Ok(Channel {
                    index: parse_channel_index(&channel.channel_label)?,
                    tokens: channel
                        .items
                        .iter()
                        .map(parse_item)
                        .collect::<Result<Vec<_>>>()?,
                })
            })
            .collect()
    }
}

/// Parse the `"ch_N"` channel label convention into an index.
fn parse_channel_index(label: &str) -> Result<u32> {
    label
        .strip_prefix("ch_")
        .and_then(|n| n.parse::<u32>().ok())
        .ok_or_else(|| CallscribeError::ResultShape {
            message: format!("unrecognized channel label: {label}"),
        })
}

fn parse_item(item: &EngineItem) -> Result<Token> {
    let text = item
        .alternatives
        .first()
        .map(|alt| alt.content.clone())
        .ok_or_else(|| CallscribeError::ResultShape {
            message: format!("item of type {} has no alternatives", item.item_type),
        })?;

    match item.item_type.as_str() {
        "pronunciation" => Ok(Token::Word {
            start_time: parse_time(item.start_time.as_deref(), "start_time")?,
            end_time: parse_time(item.end_time.as_deref(), "end_time")?,
            text,
        }),
        "punctuation" => Ok(Token::Punctuation { text }),
        other => Err(CallscribeError::ResultShape {
            message: format!("unknown item type: {other}"),
        }),
    }
}

/// Pronunciation item times arrive as numeric strings (e.g. `"1.44"`).
fn parse_time(value: Option<&str>, field: &str) -> Result<f64> {
    let raw = value.ok_or_else(|| CallscribeError::ResultShape {
        message: format!("pronunciation item missing {field}"),
    })?;
    raw.parse::<f64>().map_err(|_| CallscribeError::ResultShape {
        message: format!("unparsable {field}: {raw:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN_ONLY: &str = r#"{
        "results": {
            "transcripts": [{"transcript": "hello world"}]
        }
    }"#;

    const CHANNELED: &str = r#"{
        "results": {
            "transcripts": [{"transcript": "yes hello there."}],
            "channel_labels": {
                "channels": [
                    {
                        "channel_label": "ch_0",
                        "items": [
                            {
                                "type": "pronunciation",
                                "start_time": "0.0",
                                "end_time": "0.2",
                                "alternatives": [{"content": "yes"}]
                            }
                        ]
                    },
                    {
                        "channel_label": "ch_1",
                        "items": [
                            {
                                "type": "pronunciation",
                                "start_time": "1.0",
                                "end_time": "1.3",
                                "alternatives": [{"content": "hello"}]
                            },
                            {
                                "type": "pronunciation",
                                "start_time": "1.4",
                                "end_time": "1.7",
                                "alternatives": [{"content": "there"}]
                            },
                            {
                                "type": "punctuation",
                                "alternatives": [{"content": "."}]
                            }
                        ]
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn test_plain_transcript_extraction() {
        let result = EngineResult::from_json(PLAIN_ONLY).unwrap();
        assert_eq!(result.plain_transcript().unwrap(), "hello world");
    }

    #[test]
    fn test_missing_transcripts_is_shape_error() {
        let result = EngineResult::from_json(r#"{"results": {"transcripts": []}}"#).unwrap();
        let err = result.plain_transcript().unwrap_err();
        assert!(err.to_string().contains("results.transcripts"));
    }

    #[test]
    fn test_missing_results_is_shape_error() {
        let err = EngineResult::from_json(r#"{"status": "COMPLETED"}"#).unwrap_err();
        assert!(matches!(err, CallscribeError::ResultShape { .. }));
    }

    #[test]
    fn test_no_channel_labels_yields_empty_channels() {
        let result = EngineResult::from_json(PLAIN_ONLY).unwrap();
        assert!(result.channels().unwrap().is_empty());
    }

    #[test]
    fn test_channeled_document_parses_to_domain_channels() {
        let result = EngineResult::from_json(CHANNELED).unwrap();
        let channels = result.channels().unwrap();
        assert_eq!(channels.len(), 2);

        assert_eq!(channels[0].index, 0);
        assert_eq!(channels[0].tokens, vec![Token::word("yes", 0.0, 0.2)]);

        assert_eq!(channels[1].index, 1);
        assert_eq!(
            channels[1].tokens,
            vec![
                Token::word("hello", 1.0, 1.3),
                Token::word("there", 1.4, 1.7),
                Token::punctuation("."),
            ]
        );
    }

    #[test]
    fn test_bad_channel_label_is_shape_error() {
        let raw = r#"{
            "results": {
                "transcripts": [{"transcript": ""}],
                "channel_labels": {
                    "channels": [{"channel_label": "left", "items": []}]
                }
            }
        }"#;
        let result = EngineResult::from_json(raw).unwrap();
        let err = result.channels().unwrap_err();
        assert!(err.to_string().contains("channel label"));
    }

    #[test]
    fn test_high_channel_index_parses() {
        let raw = r#"{
            "results": {
                "transcripts": [{"transcript": ""}],
                "channel_labels": {
                    "channels": [{"channel_label": "ch_2", "items": []}]
                }
            }
        }"#;
        let result = EngineResult::from_json(raw).unwrap();
        let channels = result.channels().unwrap();
        assert_eq!(channels[0].index, 2);
    }

    #[test]
    fn test_unparsable_start_time_is_shape_error() {
        let raw = r#"{
            "results": {
                "transcripts": [{"transcript": ""}],
                "channel_labels": {
                    "channels": [{
                        "channel_label": "ch_0",
                        "items": [{
                            "type": "pronunciation",
                            "start_time": "abc",
                            "end_time": "0.5",
                            "alternatives": [{"content": "hi"}]
                        }]
                    }]
                }
            }
        }"#;
        let result = EngineResult::from_json(raw).unwrap();
        let err = result.channels().unwrap_err();
        assert!(err.to_string().contains("start_time"));
    }

    #[test]
    fn test_pronunciation_missing_times_is_shape_error() {
        let raw = r#"{
            "results": {
                "transcripts": [{"transcript": ""}],
                "channel_labels": {
                    "channels": [{
                        "channel_label": "ch_0",
                        "items": [{
                            "type": "pronunciation",
                            "alternatives": [{"content": "hi"}]
                        }]
                    }]
                }
            }
        }"#;
        let result = EngineResult::from_json(raw).unwrap();
        assert!(result.channels().is_err());
    }

    #[test]
    fn test_unknown_item_type_is_shape_error() {
        let raw = r#"{
            "results": {
                "transcripts": [{"transcript": ""}],
                "channel_labels": {
                    "channels": [{
                        "channel_label": "ch_0",
                        "items": [{
                            "type": "noise",
                            "alternatives": [{"content": "?"}]
                        }]
                    }]
                }
            }
        }"#;
        let result = EngineResult::from_json(raw).unwrap();
        let err = result.channels().unwrap_err();
        assert!(err.to_string().contains("unknown item type"));
    }

    #[test]
    fn test_item_without_alternatives_is_shape_error() {
        let raw = r#"{
            "results": {
                "transcripts": [{"transcript": ""}],
                "channel_labels": {
                    "channels": [{
                        "channel_label": "ch_0",
                        "items": [{"type": "punctuation", "alternatives": []}]
                    }]
                }
            }
        }"#;
        let result = EngineResult::from_json(raw).unwrap();
        assert!(result.channels().is_err());
    }
}
