//! Distinctive keyword extraction.
//!
//! A segment's term distribution is contrasted against the buckets flanking
//! it; terms that are both frequent inside the segment and rare around it
//! rank highest.

pub mod scoring;

pub use scoring::{proportion, ratio, reference_buckets, KeywordError, KeywordExtractor};
