use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::types::Keyword;

/// Cosine distance in `[0, 2]`. A zero vector is at distance `1.0` from
/// everything, itself included.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    (1.0 - dot / (norm_a * norm_b)).clamp(0.0, 2.0)
}

/// A segment's topic: an L2-normalized weight per keyword over a closed
/// vocabulary ordered by descending weight.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordVector {
    terms: Vec<String>,
    index: BTreeMap<String, usize>,
    weights: Vec<f64>,
}

impl KeywordVector {
    pub fn from_keywords(keywords: &[Keyword]) -> Self {
        Self::from_ranked(keywords.iter().map(|k| (k.term.clone(), k.score)).collect())
    }

    /// Build from a term → weight map. Ties in weight are ordered by term.
    pub fn from_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut ranked: Vec<(String, f64)> =
            scores.into_iter().map(|(t, w)| (t.into(), w)).collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0));
        Self::from_ranked(ranked)
    }

    fn from_ranked(mut ranked: Vec<(String, f64)>) -> Self {
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let mut terms = Vec::with_capacity(ranked.len());
        let mut index = BTreeMap::new();
        let mut weights = Vec::with_capacity(ranked.len());
        for (term, weight) in ranked {
            if index.contains_key(&term) {
                continue;
            }
            index.insert(term.clone(), terms.len());
            terms.push(term);
            weights.push(weight);
        }

        let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in &mut weights {
                *w /= norm;
            }
        }

        Self {
            terms,
            index,
            weights,
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Boolean presence of each keyword among the sentence's whitespace
    /// separated words.
    pub fn vectorize(&self, sentence: &str) -> Vec<f64> {
        let mut presence = vec![0.0; self.terms.len()];
        for word in sentence.split_whitespace() {
            if let Some(&i) = self.index.get(word) {
                presence[i] = 1.0;
            }
        }
        presence
    }
}
