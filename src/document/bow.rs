use std::collections::BTreeMap;

use tracing::debug;

use crate::document::store::DocumentStore;
use crate::document::tokenizer::Tokenizer;
use crate::types::{Buckets, MatrixError, TermCountMatrix, Vocabulary};

/// Terms seen at least `min_count` times across the store, most frequent
/// first, ties by term.
pub fn scan_vocabulary<S, T>(store: &S, tokenizer: &T, min_count: usize) -> Vocabulary
where
    S: DocumentStore + ?Sized,
    T: Tokenizer + ?Sized,
{
    let mut counter: BTreeMap<String, usize> = BTreeMap::new();
    for date in store.dates() {
        for doc in store.documents_on(date) {
            for word in tokenizer.tokenize(doc) {
                *counter.entry(word).or_insert(0) += 1;
            }
        }
    }

    let mut terms: Vec<(String, usize)> = counter
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .collect();
    // BTreeMap order makes the sort stable by term
    terms.sort_by(|a, b| b.1.cmp(&a.1));

    let vocabulary = Vocabulary::from_terms(terms.into_iter().map(|(term, _)| term));
    // Terms come from map keys, so they are unique.
    vocabulary.unwrap_or_default()
}

/// One bucket per date holding at least `min_docs` documents; each row counts
/// the vocabulary terms of that date's documents.
pub fn build_buckets<S, T>(
    store: &S,
    tokenizer: &T,
    vocabulary: Vocabulary,
    min_docs: usize,
) -> Result<Buckets, MatrixError>
where
    S: DocumentStore + ?Sized,
    T: Tokenizer + ?Sized,
{
    let mut rows = Vec::new();
    let mut dates = Vec::new();
    for date in store.dates() {
        let docs = store.documents_on(date);
        if docs.len() < min_docs {
            debug!(%date, documents = docs.len(), min_docs, "skipping sparse date");
            continue;
        }

        let mut row: BTreeMap<usize, u32> = BTreeMap::new();
        for doc in docs {
            for word in tokenizer.tokenize(doc) {
                if let Some(column) = vocabulary.index_of(&word) {
                    *row.entry(column).or_insert(0) += 1;
                }
            }
        }
        rows.push(row.into_iter().collect());
        dates.push(date);
    }

    let counts = TermCountMatrix::from_rows(vocabulary.len(), rows)?;
    Buckets::new(counts, vocabulary, dates)
}
