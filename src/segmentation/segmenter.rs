use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, SegmentationConfig};
use crate::types::{DissimilarityMatrix, Segment};

/// Number of buckets a diagnostic shift value looks back from its end point.
const SHIFT_LOOKBACK: usize = 3;

#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("Invalid segmentation config: {0}")]
    Config(#[from] ConfigError),

    #[error("Segmentation did not converge within {limit} iterations")]
    IterationLimitExceeded { limit: usize },
}

/// Mean dissimilarity of `[begin, end)` against the `window` buckets that
/// follow `end`, minus the mean internal dissimilarity of `[begin, end)`.
///
/// Large positive values mean `end` is a strong boundary. Blocks that fall
/// outside the matrix contribute nothing and the shift is `0.0`.
pub fn point_shift(matrix: &DissimilarityMatrix, begin: usize, end: usize, window: usize) -> f64 {
    let external = matrix.block_mean(begin..end, end..end + window);
    let internal = matrix.block_mean(begin..end, begin..end);
    match (external, internal) {
        (Some(external), Some(internal)) => external - internal,
        _ => 0.0,
    }
}

/// Greedy, causal change-point segmentation over a bucket dissimilarity matrix.
pub struct Segmenter {
    config: SegmentationConfig,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            config: SegmentationConfig::v0(),
        }
    }
}

impl Segmenter {
    pub fn new(config: SegmentationConfig) -> Result<Self, SegmentationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Boundary strength per bucket, for inspection only.
    ///
    /// For each end point `e` in `[window, n - window)` the shift of
    /// `[e - 3, e)` is stored at the block's begin index. Indices that are
    /// never a block begin stay `0.0`.
    pub fn shift_distance(&self, matrix: &DissimilarityMatrix, window: usize) -> Vec<f64> {
        let n = matrix.len();
        let mut dist = vec![0.0; n];
        for end in window..n.saturating_sub(window) {
            let begin = end.saturating_sub(SHIFT_LOOKBACK);
            dist[begin] = point_shift(matrix, begin, end, window);
        }
        dist
    }

    /// Scan the matrix once and return non-overlapping segments in order.
    ///
    /// Bucket 0 never starts a segment since it has no predecessor. A segment
    /// is emitted at the first end point whose shift reaches the threshold,
    /// provided it is long enough and internally coherent; otherwise the scan
    /// moves on to the next begin bucket.
    pub fn segment(&self, matrix: &DissimilarityMatrix) -> Result<Vec<Segment>, SegmentationError> {
        let SegmentationConfig {
            threshold,
            min_length,
            max_length,
        } = self.config;

        let n = matrix.len();
        let limit = n * max_length;
        let mut segments = Vec::new();
        let mut iterations = 0;
        let mut begin = 1;

        while begin < n {
            iterations += 1;
            if iterations > limit {
                return Err(SegmentationError::IterationLimitExceeded { limit });
            }

            if matrix.get(begin, begin - 1).is_some_and(|d| d > threshold) {
                begin += 1;
                continue;
            }

            let mut next = begin + 1;
            for end in begin + 1..n.min(begin + max_length) {
                if point_shift(matrix, begin, end, 1) < threshold {
                    continue;
                }

                let internal = matrix.block_mean(begin..end, begin..end).unwrap_or(0.0);
                if end - begin < min_length || internal > threshold {
                    break;
                }

                segments.push(Segment::new(begin, end));
                next = end;
                break;
            }
            begin = next;
        }

        debug!(
            buckets = n,
            segments = segments.len(),
            iterations,
            "segmentation finished"
        );
        Ok(segments)
    }
}
