pub mod matrix;
pub mod timeline;

pub use matrix::{Buckets, DissimilarityMatrix, MatrixError, TermCountMatrix, Vocabulary};
pub use timeline::{Keyword, Segment, Timeline, TimelineEntry, TimelineMetadata};
