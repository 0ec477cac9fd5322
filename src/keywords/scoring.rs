use std::cmp::Ordering;

use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, KeywordConfig};
use crate::types::{Keyword, TermCountMatrix, Vocabulary};

#[derive(Debug, Error)]
pub enum KeywordError {
    #[error("Invalid keyword config: {0}")]
    Config(#[from] ConfigError),

    #[error("Bucket {index} out of range for {buckets} buckets")]
    IndexOutOfRange { index: usize, buckets: usize },

    #[error("Vocabulary has {found} terms but the count matrix has {expected} columns")]
    VocabularyMismatch { expected: usize, found: usize },
}

/// Sum the rows at `buckets` and L1-normalize them into a distribution.
///
/// A selection whose counts sum to zero yields the zero vector, which callers
/// treat as "no signal".
pub fn proportion(counts: &TermCountMatrix, buckets: &[usize]) -> Result<Vec<f64>, KeywordError> {
    let mut dist = vec![0.0; counts.vocabulary_size()];
    for &bucket in buckets {
        if bucket >= counts.buckets() {
            return Err(KeywordError::IndexOutOfRange {
                index: bucket,
                buckets: counts.buckets(),
            });
        }
        for (column, count) in counts.row(bucket) {
            dist[column] += f64::from(count);
        }
    }

    let total: f64 = dist.iter().sum();
    if total > 0.0 {
        for value in &mut dist {
            *value /= total;
        }
    }
    Ok(dist)
}

/// Elementwise `pos / (pos + reference)`, with `0` where both are zero.
pub fn ratio(pos: &[f64], reference: &[f64]) -> Vec<f64> {
    debug_assert_eq!(pos.len(), reference.len());
    pos.iter()
        .zip(reference)
        .map(|(&p, &r)| {
            let denom = p + r;
            if denom > 0.0 {
                p / denom
            } else {
                0.0
            }
        })
        .collect()
}

/// Reference buckets for the segment `[begin, end)` of `length` buckets in a
/// stream of `n` buckets: the left window up to `begin` and the right tail
/// starting `margin + span` buckets after the segment's last bucket
/// `end - 1`, where `span = floor(length * ref_size)`.
pub fn reference_buckets(
    begin: usize,
    end: usize,
    length: usize,
    n: usize,
    margin: usize,
    ref_size: f64,
) -> Vec<usize> {
    let span = (length as f64 * ref_size).floor() as usize;
    let last = end.saturating_sub(1);
    let left = begin.saturating_sub(margin + span)..begin.min(n);
    let right = (last + margin + span).min(n)..n;
    left.chain(right).collect()
}

pub struct KeywordExtractor {
    config: KeywordConfig,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self {
            config: KeywordConfig::v0(),
        }
    }
}

impl KeywordExtractor {
    pub fn new(config: KeywordConfig) -> Result<Self, KeywordError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KeywordConfig {
        &self.config
    }

    /// Rank the distinctive terms of the buckets in `segment`.
    ///
    /// The `num_candidates` most frequent terms of the segment are ranked by
    /// distinctiveness and the best `num_keywords` are returned, highest score
    /// first. An empty segment, an empty reference window, or a segment with no
    /// counts gives an empty list.
    pub fn extract(
        &self,
        counts: &TermCountMatrix,
        vocabulary: &Vocabulary,
        segment: &[usize],
    ) -> Result<Vec<Keyword>, KeywordError> {
        if vocabulary.len() != counts.vocabulary_size() {
            return Err(KeywordError::VocabularyMismatch {
                expected: counts.vocabulary_size(),
                found: vocabulary.len(),
            });
        }

        let (Some(&begin), Some(&last)) = (segment.iter().min(), segment.iter().max()) else {
            return Ok(Vec::new());
        };

        let pos = proportion(counts, segment)?;

        let reference_idx = reference_buckets(
            begin,
            last + 1,
            segment.len(),
            counts.buckets(),
            self.config.margin,
            self.config.ref_size,
        );
        if reference_idx.is_empty() {
            debug!(begin, end = last + 1, "empty reference window, no keywords");
            return Ok(Vec::new());
        }
        let reference = proportion(counts, &reference_idx)?;
        let score = ratio(&pos, &reference);

        // Candidates: frequent terms only. Order by (proportion desc, column asc).
        let mut candidates: Vec<usize> = (0..pos.len()).filter(|&i| pos[i] > 0.0).collect();
        candidates.sort_by(|&a, &b| {
            pos[b]
                .partial_cmp(&pos[a])
                .unwrap_or(Ordering::Equal)
                .then(a.cmp(&b))
        });
        candidates.truncate(self.config.num_candidates);

        // Stable: equal scores keep the frequency order.
        candidates.sort_by(|&a, &b| score[b].partial_cmp(&score[a]).unwrap_or(Ordering::Equal));
        candidates.truncate(self.config.num_keywords);

        Ok(candidates
            .into_iter()
            .filter_map(|i| {
                vocabulary.term(i).map(|term| Keyword {
                    term: term.to_string(),
                    score: score[i],
                    proportion: pos[i],
                })
            })
            .collect())
    }
}
