use std::cmp::Ordering;

use thiserror::Error;
use tracing::debug;

use crate::config::SummaryConfig;
use crate::summary::penalty::{NoPenalty, Penalty};
use crate::summary::vectorize::{cosine_distance, KeywordVector};

/// Added to a candidate's distance once it is picked or suppressed. Larger
/// than any cosine distance.
const INFLATION: f64 = 2.0;

#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    #[error("Diversity must lie in [0, 1], got {0}")]
    InvalidDiversity(f64),

    #[error("Expected {expected} penalties, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Greedily pick up to `top_k` sentence indices.
///
/// Each round takes the candidate with the smallest
/// `cosine_distance(sentence, topic) + penalty` and suppresses every sentence
/// closer than `diversity` to it. Suppressed and picked candidates are never
/// picked again, so the result may be shorter than `top_k`.
pub fn select(
    sentence_vectors: &[Vec<f64>],
    topic: &[f64],
    penalties: &[f64],
    top_k: usize,
    diversity: f64,
) -> Result<Vec<usize>, SummaryError> {
    if !(0.0..=1.0).contains(&diversity) {
        return Err(SummaryError::InvalidDiversity(diversity));
    }
    if penalties.len() != sentence_vectors.len() {
        return Err(SummaryError::DimensionMismatch {
            expected: sentence_vectors.len(),
            found: penalties.len(),
        });
    }

    let mut dist: Vec<f64> = sentence_vectors
        .iter()
        .zip(penalties)
        .map(|(v, p)| cosine_distance(v, topic) + p)
        .collect();
    let mut available = vec![true; dist.len()];
    let mut selected = Vec::with_capacity(top_k.min(dist.len()));

    while selected.len() < top_k {
        let best = dist
            .iter()
            .enumerate()
            .filter(|(i, _)| available[*i])
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
            .map(|(i, _)| i);
        let Some(best) = best else {
            break;
        };

        selected.push(best);
        dist[best] += INFLATION;
        available[best] = false;

        for (j, vector) in sentence_vectors.iter().enumerate() {
            if available[j] && cosine_distance(vector, &sentence_vectors[best]) < diversity {
                dist[j] += INFLATION;
                available[j] = false;
            }
        }
    }

    Ok(selected)
}

/// Keysentence selector for one segment.
pub struct DiversifiedSelector<P = NoPenalty> {
    config: SummaryConfig,
    penalty: P,
}

impl Default for DiversifiedSelector<NoPenalty> {
    fn default() -> Self {
        Self {
            config: SummaryConfig::v0(),
            penalty: NoPenalty,
        }
    }
}

impl DiversifiedSelector<NoPenalty> {
    pub fn new(config: SummaryConfig) -> Self {
        Self {
            config,
            penalty: NoPenalty,
        }
    }
}

impl<P: Penalty> DiversifiedSelector<P> {
    pub fn with_penalty<Q: Penalty>(self, penalty: Q) -> DiversifiedSelector<Q> {
        DiversifiedSelector {
            config: self.config,
            penalty,
        }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn penalty(&self) -> &P {
        &self.penalty
    }

    /// Return up to `num_keysents` sentences in selection order, most topical
    /// and least redundant first. Sentences are returned as given.
    pub fn summarize<S: AsRef<str>>(
        &self,
        keywords: &KeywordVector,
        sentences: &[S],
    ) -> Result<Vec<String>, SummaryError> {
        if !(0.0..=1.0).contains(&self.config.diversity) {
            return Err(SummaryError::InvalidDiversity(self.config.diversity));
        }

        let vectors: Vec<Vec<f64>> = sentences
            .iter()
            .map(|s| keywords.vectorize(s.as_ref()))
            .collect();
        let penalties: Vec<f64> = sentences
            .iter()
            .map(|s| self.penalty.penalty(s.as_ref()))
            .collect();

        let picked = select(
            &vectors,
            keywords.weights(),
            &penalties,
            self.config.num_keysents,
            self.config.diversity,
        )?;

        debug!(
            candidates = sentences.len(),
            selected = picked.len(),
            "selected keysentences"
        );
        Ok(picked
            .into_iter()
            .map(|i| sentences[i].as_ref().to_string())
            .collect())
    }
}
