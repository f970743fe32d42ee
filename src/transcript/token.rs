//! Token and utterance types for conversation reconstruction.
//!
//! The remote engine emits a flat stream of word and punctuation events per
//! audio channel. These types are the domain view of that stream: `Token` is
//! one event, `Utterance` is a contiguous run of one speaker's speech built
//! by the segmenter.

use serde::{Deserialize, Serialize};

/// One atomic unit of engine output for a single channel.
///
/// Word tokens carry timing in seconds; punctuation tokens carry none and
/// attach to the word that precedes them in the stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// A spoken word with start/end timestamps in seconds.
    Word {
        text: String,
        start_time: f64,
        end_time: f64,
    },
    /// A punctuation mark (".", ",", "?", ...) with no timing of its own.
    Punctuation { text: String },
}

impl Token {
    /// Convenience constructor for a word token.
    pub fn word(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Token::Word {
            text: text.into(),
            start_time,
            end_time,
        }
    }

    /// Convenience constructor for a punctuation token.
    pub fn punctuation(text: impl Into<String>) -> Self {
        Token::Punctuation { text: text.into() }
    }
}

/// A contiguous run of one speaker's speech with no internal pause exceeding
/// the silence-gap threshold.
///
/// Immutable once built by the segmenter; consumed by the assembler.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Start time of the first word, in seconds.
    pub start_time: f64,
    /// Words joined by single spaces, punctuation fused without a space.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_constructor() {
        let token = Token::word("hello", 0.5, 0.9);
        assert_eq!(
            token,
            Token::Word {
                text: "hello".to_string(),
                start_time: 0.5,
                end_time: 0.9,
            }
        );
    }

    #[test]
    fn test_punctuation_constructor() {
        let token = Token::punctuation(".");
        assert_eq!(
            token,
            Token::Punctuation {
                text: ".".to_string()
            }
        );
    }

    #[test]
    fn test_token_serde_round_trip() {
        let tokens = vec![Token::word("hi", 0.0, 0.3), Token::punctuation(",")];
        let json = serde_json::to_string(&tokens).unwrap();
        let back: Vec<Token> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tokens);
    }
}
