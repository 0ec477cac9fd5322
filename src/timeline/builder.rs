use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, TimelineConfig};
use crate::document::DocumentStore;
use crate::keywords::{KeywordError, KeywordExtractor};
use crate::segmentation::{SegmentationError, Segmenter};
use crate::summary::{DiversifiedSelector, KeywordVector, LengthAnchorPenalty, Penalty, SummaryError};
use crate::timeline::versioning::timeline_version;
use crate::types::{
    Buckets, DissimilarityMatrix, Segment, Timeline, TimelineEntry, TimelineMetadata,
};

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("Segmentation failed: {0}")]
    Segmentation(#[from] SegmentationError),
    #[error("Keyword extraction failed: {0}")]
    Keywords(#[from] KeywordError),
    #[error("Keysentence selection failed: {0}")]
    Summary(#[from] SummaryError),
    #[error("Distance matrix covers {distances} buckets, term counts cover {buckets}")]
    Misaligned { distances: usize, buckets: usize },
    #[error("Segment [{begin}, {end}) exceeds {buckets} buckets")]
    SegmentOutOfRange {
        begin: usize,
        end: usize,
        buckets: usize,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Chains segmentation, keyword extraction and keysentence selection.
///
/// Segments share no mutable state; each produces at most one entry.
pub struct TimelineBuilder<P = LengthAnchorPenalty> {
    config: TimelineConfig,
    segmenter: Segmenter,
    extractor: KeywordExtractor,
    selector: DiversifiedSelector<P>,
}

impl TimelineBuilder<LengthAnchorPenalty> {
    pub fn new(config: TimelineConfig) -> Result<Self, TimelineError> {
        config.validate()?;
        Ok(Self {
            segmenter: Segmenter::new(config.segmentation.clone())?,
            extractor: KeywordExtractor::new(config.keywords.clone())?,
            selector: DiversifiedSelector::new(config.summary.clone())
                .with_penalty(LengthAnchorPenalty::v0()),
            config,
        })
    }
}

impl<P: Penalty> TimelineBuilder<P> {
    pub fn with_penalty<Q: Penalty>(self, penalty: Q) -> TimelineBuilder<Q> {
        TimelineBuilder {
            config: self.config,
            segmenter: self.segmenter,
            extractor: self.extractor,
            selector: self.selector.with_penalty(penalty),
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Segment the distance matrix, then summarize every segment.
    pub fn build<S>(
        &self,
        distances: &DissimilarityMatrix,
        buckets: &Buckets,
        store: &S,
    ) -> Result<Timeline, TimelineError>
    where
        S: DocumentStore + ?Sized,
    {
        if distances.len() != buckets.len() {
            return Err(TimelineError::Misaligned {
                distances: distances.len(),
                buckets: buckets.len(),
            });
        }
        let segments = self.segmenter.segment(distances)?;
        self.summarize_segments(&segments, buckets, store)
    }

    /// Summarize precomputed segments, in order. Segments without keywords
    /// produce no entry.
    pub fn summarize_segments<S>(
        &self,
        segments: &[Segment],
        buckets: &Buckets,
        store: &S,
    ) -> Result<Timeline, TimelineError>
    where
        S: DocumentStore + ?Sized,
    {
        let mut entries = Vec::with_capacity(segments.len());
        let mut skipped = 0;

        for (i, segment) in segments.iter().enumerate() {
            match self.summarize_segment(segment, buckets, store)? {
                Some(entry) => {
                    entries.push(entry);
                    debug!(segment = i + 1, total = segments.len(), "summarized segment");
                }
                None => {
                    skipped += 1;
                    debug!(
                        segment = i + 1,
                        begin = segment.begin,
                        end = segment.end,
                        "no keywords, skipping segment"
                    );
                }
            }
        }

        let metadata = TimelineMetadata {
            timeline_version: timeline_version(&self.config, &entries)?,
            buckets: buckets.len(),
            segments_found: segments.len(),
            segments_skipped: skipped,
            entries: entries.len(),
        };

        Ok(Timeline { entries, metadata })
    }

    fn summarize_segment<S>(
        &self,
        segment: &Segment,
        buckets: &Buckets,
        store: &S,
    ) -> Result<Option<TimelineEntry>, TimelineError>
    where
        S: DocumentStore + ?Sized,
    {
        if segment.begin >= segment.end || segment.end > buckets.len() {
            return Err(TimelineError::SegmentOutOfRange {
                begin: segment.begin,
                end: segment.end,
                buckets: buckets.len(),
            });
        }

        let indices: Vec<usize> = segment.indices().collect();
        let keywords = self
            .extractor
            .extract(&buckets.counts, &buckets.vocabulary, &indices)?;
        if keywords.is_empty() {
            return Ok(None);
        }

        let period_begin = buckets.dates[segment.begin];
        let period_end = buckets.dates[segment.end - 1];
        let sentences = store.sentences_between(
            period_begin,
            period_end,
            &self.config.summary.sentence_separator,
        );

        let topic = KeywordVector::from_keywords(&keywords);
        let keysentences = self.selector.summarize(&topic, &sentences)?;

        Ok(Some(TimelineEntry {
            period_begin,
            period_end,
            segment: *segment,
            keywords,
            keysentences,
        }))
    }
}
