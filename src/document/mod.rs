//! Collaborators that materialize documents before the core algorithms run:
//! dated document stores, tokenizers and bag-of-words construction.

pub mod bow;
pub mod store;
pub mod tokenizer;

pub use bow::{build_buckets, scan_vocabulary};
pub use store::{load_directory, DatedDocuments, DocumentStore, InMemoryStore, MergedStore, StoreError};
pub use tokenizer::{Stopwords, TagFilter, Tokenizer, WhitespaceTokenizer, WordFilter};
