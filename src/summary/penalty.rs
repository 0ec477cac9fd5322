use serde::{Deserialize, Serialize};

/// Penalty for blank sentences; also the base for badly shaped ones.
pub const MAX_PENALTY: f64 = 2.0;

/// Non-negative cost of picking a sentence. `0.0` is an ideal sentence.
pub trait Penalty {
    fn penalty(&self, sentence: &str) -> f64;
}

impl<F> Penalty for F
where
    F: Fn(&str) -> f64,
{
    fn penalty(&self, sentence: &str) -> f64 {
        self(sentence)
    }
}

/// Zero for every sentence.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPenalty;

impl Penalty for NoPenalty {
    fn penalty(&self, _sentence: &str) -> f64 {
        0.0
    }
}

/// Prefers well-formed sentences of a preferred word count that mention at
/// least one anchor term.
///
/// - blank: [`MAX_PENALTY`]
/// - `min_len <= words <= max_len` and ending with `terminal`: `0`
/// - otherwise: `2 + ln(|words - max_len| + 1)`
///
/// `anchor_penalty` is added to non-blank sentences when none of
/// `anchor_terms` occurs as a substring. With no anchor terms that is every
/// such sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthAnchorPenalty {
    pub min_len: usize,
    pub max_len: usize,
    pub anchor_terms: Vec<String>,
    pub anchor_penalty: f64,
    /// Declarative sentence ending. Korean news text ends in "다".
    pub terminal: String,
}

impl LengthAnchorPenalty {
    pub fn v0() -> Self {
        Self {
            min_len: 15,
            max_len: 25,
            anchor_terms: Vec::new(),
            anchor_penalty: 0.4,
            terminal: "다".into(),
        }
    }

    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self {
            min_len,
            max_len,
            ..Self::v0()
        }
    }

    pub fn with_anchor_terms<I, S>(mut self, terms: I, penalty: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.anchor_terms = terms.into_iter().map(Into::into).collect();
        self.anchor_penalty = penalty;
        self
    }

    pub fn with_terminal(mut self, terminal: impl Into<String>) -> Self {
        self.terminal = terminal.into();
        self
    }
}

impl Default for LengthAnchorPenalty {
    fn default() -> Self {
        Self::v0()
    }
}

impl Penalty for LengthAnchorPenalty {
    fn penalty(&self, sentence: &str) -> f64 {
        let sentence = sentence.trim_end();
        if sentence.is_empty() {
            return MAX_PENALTY;
        }

        let n_words = sentence.split_whitespace().count();
        let well_formed = (self.min_len..=self.max_len).contains(&n_words)
            && sentence.ends_with(self.terminal.as_str());

        let mut penalty = if well_formed {
            0.0
        } else {
            let deviation = (n_words as f64 - self.max_len as f64).abs();
            MAX_PENALTY + (deviation + 1.0).ln()
        };

        let anchored = self
            .anchor_terms
            .iter()
            .any(|term| sentence.contains(term.as_str()));
        if !anchored {
            penalty += self.anchor_penalty;
        }
        penalty
    }
}
