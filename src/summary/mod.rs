//! Diversified extractive summarization.
//!
//! Sentences are scored by cosine distance to a segment's keyword vector plus
//! a per-sentence penalty, then picked greedily while near-duplicates of each
//! pick are suppressed.

pub mod penalty;
pub mod selector;
pub mod vectorize;

pub use penalty::{LengthAnchorPenalty, NoPenalty, Penalty};
pub use selector::{select, DiversifiedSelector, SummaryError};
pub use vectorize::{cosine_distance, KeywordVector};
