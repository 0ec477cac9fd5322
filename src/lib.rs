//! Event timelines from chronologically ordered document streams.
//!
//! `timeline-core` cuts a stream of time buckets into coherent, mutually
//! distinct periods from a bucket dissimilarity matrix, ranks each period's
//! distinctive keywords against its surroundings, and picks a small, diverse
//! set of representative sentences. All operations are deterministic:
//! identical inputs always produce identical timelines.

pub mod config;
pub mod document;
pub mod keywords;
pub mod segmentation;
pub mod summary;
pub mod timeline;
pub mod types;
