//! Utterance segmentation by silence gaps.
//!
//! Groups one channel's ordered token stream into utterances: a gap between
//! consecutive words larger than the threshold starts a new utterance, and
//! punctuation is fused onto the word it follows with no separating space.

use crate::transcript::token::{Token, Utterance};

/// Accumulator for the utterance under construction.
///
/// Local, scoped state with an explicit flush/reset cycle; never outlives a
/// single `segment` call.
#[derive(Debug, Default)]
struct UtteranceBuffer {
    words: Vec<(f64, String)>,
}

impl UtteranceBuffer {
    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn push_word(&mut self, start_time: f64, text: String) {
        self.words.push((start_time, text));
    }

    /// Fuse punctuation onto the last buffered word. No-op when empty: a
    /// punctuation token with no preceding word has nothing to attach to.
    fn fuse_punctuation(&mut self, text: &str) {
        if let Some((_, last)) = self.words.last_mut() {
            last.push_str(text);
        }
    }

    /// Drain the buffer into a completed utterance. Returns `None` when empty.
    fn flush(&mut self) -> Option<Utterance> {
        let (start_time, _) = *self.words.first()?;
        let text = self
            .words
            .drain(..)
            .map(|(_, word)| word)
            .collect::<Vec<_>>()
            .join(" ");
        Some(Utterance { start_time, text })
    }
}

/// Segment one channel's token stream into utterances.
///
/// Words accumulate until the silence gap before the next word exceeds
/// `gap_threshold` seconds (strictly greater; a gap exactly at the threshold
/// does not split). Punctuation arriving before any word is discarded.
/// Trusts the engine's non-decreasing start-time ordering.
pub fn segment(tokens: &[Token], gap_threshold: f64) -> Vec<Utterance> {
    let mut utterances = Vec::new();
    let mut buffer = UtteranceBuffer::default();
    let mut last_end_time: Option<f64> = None;

    for token in tokens {
        match token {
            Token::Word {
                text,
                start_time,
                end_time,
            } => {
                let gap = last_end_time.map_or(0.0, |end| start_time - end);
                if !buffer.is_empty()
                    && gap > gap_threshold
                    && let Some(utterance) = buffer.flush()
                {
                    utterances.push(utterance);
                }
                buffer.push_word(*start_time, text.clone());
                last_end_time = Some(*end_time);
            }
            Token::Punctuation { text } => {
                buffer.fuse_punctuation(text);
            }
        }
    }

    if let Some(utterance) = buffer.flush() {
        utterances.push(utterance);
    }

    utterances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::GAP_THRESHOLD_SECS;

    #[test]
    fn test_empty_stream_yields_no_utterances() {
        assert!(segment(&[], GAP_THRESHOLD_SECS).is_empty());
    }

    #[test]
    fn test_single_word() {
        let tokens = vec![Token::word("hello", 0.0, 0.4)];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].start_time, 0.0);
        assert_eq!(utterances[0].text, "hello");
    }

    #[test]
    fn test_words_below_threshold_join_into_one_utterance() {
        let tokens = vec![
            Token::word("the", 0.0, 0.2),
            Token::word("quick", 0.3, 0.6),
            Token::word("fox", 1.0, 1.3),
        ];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].text, "the quick fox");
    }

    #[test]
    fn test_gap_above_threshold_splits() {
        let tokens = vec![
            Token::word("yes", 0.0, 0.3),
            // 2.0s of silence before the next word
            Token::word("okay", 2.3, 2.6),
        ];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].text, "yes");
        assert_eq!(utterances[0].start_time, 0.0);
        assert_eq!(utterances[1].text, "okay");
        assert_eq!(utterances[1].start_time, 2.3);
    }

    #[test]
    fn test_gap_exactly_at_threshold_does_not_split() {
        let tokens = vec![
            Token::word("one", 0.0, 0.5),
            Token::word("two", 0.5 + GAP_THRESHOLD_SECS, 2.4),
        ];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].text, "one two");
    }

    #[test]
    fn test_gap_just_over_threshold_splits() {
        let tokens = vec![
            Token::word("one", 0.0, 0.5),
            Token::word("two", 0.5 + GAP_THRESHOLD_SECS + 0.0001, 2.5),
        ];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 2);
    }

    #[test]
    fn test_punctuation_fuses_without_space() {
        let tokens = vec![Token::word("hi", 0.0, 0.3), Token::punctuation(".")];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].text, "hi.");
    }

    #[test]
    fn test_punctuation_mid_stream_attaches_to_preceding_word() {
        let tokens = vec![
            Token::word("well", 0.0, 0.3),
            Token::punctuation(","),
            Token::word("maybe", 0.5, 0.9),
        ];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].text, "well, maybe");
    }

    #[test]
    fn test_leading_punctuation_is_dropped() {
        let tokens = vec![Token::punctuation(",")];
        assert!(segment(&tokens, GAP_THRESHOLD_SECS).is_empty());
    }

    #[test]
    fn test_punctuation_only_stream_yields_nothing() {
        let tokens = vec![
            Token::punctuation("."),
            Token::punctuation("?"),
            Token::punctuation("!"),
        ];
        assert!(segment(&tokens, GAP_THRESHOLD_SECS).is_empty());
    }

    #[test]
    fn test_punctuation_does_not_affect_gap_timing() {
        // The punctuation between the words carries no timing; the gap is
        // measured word-to-word and still triggers the split.
        let tokens = vec![
            Token::word("done", 0.0, 0.4),
            Token::punctuation("."),
            Token::word("next", 3.0, 3.4),
        ];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 2);
        assert_eq!(utterances[0].text, "done.");
        assert_eq!(utterances[1].text, "next");
    }

    #[test]
    fn test_multiple_splits() {
        let tokens = vec![
            Token::word("a", 0.0, 0.1),
            Token::word("b", 2.0, 2.1),
            Token::word("c", 4.0, 4.1),
        ];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 3);
        let starts: Vec<f64> = utterances.iter().map(|u| u.start_time).collect();
        assert_eq!(starts, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_utterance_start_time_is_first_word_start() {
        let tokens = vec![
            Token::word("hello", 1.0, 1.3),
            Token::word("there", 1.4, 1.7),
            Token::punctuation("."),
        ];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].start_time, 1.0);
        assert_eq!(utterances[0].text, "hello there.");
    }

    #[test]
    fn test_first_word_never_splits_regardless_of_start_time() {
        // A stream starting late has no prior end time, so no gap is computed.
        let tokens = vec![Token::word("late", 100.0, 100.5)];
        let utterances = segment(&tokens, GAP_THRESHOLD_SECS);
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].start_time, 100.0);
    }
}
