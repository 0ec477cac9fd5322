use std::ops::Range;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Half-open run of buckets `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub begin: usize,
    pub end: usize,
    pub length: usize,
}

impl Segment {
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(end > begin, "segment [{begin}, {end}) is empty");
        Self {
            begin,
            end,
            length: end - begin,
        }
    }

    pub fn indices(&self) -> Range<usize> {
        self.begin..self.end
    }
}

/// A distinctive term of a segment.
///
/// `score` is the distinctiveness ratio in `[0, 1]`; `proportion` is the
/// term's share of all counts inside the segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub score: f64,
    pub proportion: f64,
}

/// One event on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub period_begin: NaiveDate,
    pub period_end: NaiveDate,
    pub segment: Segment,
    pub keywords: Vec<Keyword>,
    pub keysentences: Vec<String>,
}

/// Metadata describing the outcome of a timeline build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineMetadata {
    pub timeline_version: String,
    pub buckets: usize,
    pub segments_found: usize,
    pub segments_skipped: usize,
    pub entries: usize,
}

/// The final result of a timeline build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub metadata: TimelineMetadata,
}
