use chrono::NaiveDate;
use timeline_core::document::{
    build_buckets, scan_vocabulary, DatedDocuments, InMemoryStore, TagFilter, WhitespaceTokenizer,
};
use timeline_core::types::{Buckets, MatrixError, TermCountMatrix, Vocabulary};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn store() -> InMemoryStore {
    InMemoryStore::from_days(vec![
        DatedDocuments {
            date: date("2018-01-01"),
            documents: vec!["vote vote 은/R".into(), "vote rain".into()],
        },
        DatedDocuments {
            date: date("2018-01-02"),
            documents: vec!["rain".into()],
        },
        DatedDocuments {
            date: date("2018-01-03"),
            documents: vec!["vote storm".into(), "storm storm".into()],
        },
    ])
    .unwrap()
}

#[test]
fn vocabulary_keeps_frequent_terms_by_count() {
    let tokenizer = WhitespaceTokenizer::new().with_filter(TagFilter::new(["/R"]));
    let vocabulary = scan_vocabulary(&store(), &tokenizer, 2);

    // vote 4, storm 3, rain 2
    assert_eq!(vocabulary.terms(), &["vote", "storm", "rain"]);
    assert_eq!(vocabulary.index_of("storm"), Some(1));
    assert_eq!(vocabulary.index_of("은/R"), None);
}

#[test]
fn buckets_skip_sparse_dates() {
    let tokenizer = WhitespaceTokenizer::new();
    let vocabulary = Vocabulary::from_terms(["vote", "storm", "rain"]).unwrap();
    let buckets = build_buckets(&store(), &tokenizer, vocabulary, 2).unwrap();

    assert_eq!(buckets.dates, vec![date("2018-01-01"), date("2018-01-03")]);
    assert_eq!(buckets.counts.buckets(), 2);
    assert_eq!(buckets.counts.get(0, 0), Some(3));
    assert_eq!(buckets.counts.get(0, 2), Some(1));
    assert_eq!(buckets.counts.get(1, 1), Some(3));
    assert_eq!(buckets.counts.get(1, 2), Some(0));
    assert_eq!(buckets.counts.row(1).collect::<Vec<_>>(), vec![(0, 1), (1, 3)]);
}

#[test]
fn count_matrix_merges_and_validates_rows() {
    let counts = TermCountMatrix::from_rows(3, vec![vec![(2, 1), (0, 2), (2, 4), (1, 0)], vec![]]).unwrap();
    assert_eq!(counts.row(0).collect::<Vec<_>>(), vec![(0, 2), (2, 5)]);
    assert_eq!(counts.row(1).count(), 0);

    // Outside the matrix
    assert_eq!(counts.row(2).count(), 0);
    assert_eq!(counts.get(2, 0), None);
    assert_eq!(counts.get(0, 3), None);

    assert_eq!(
        TermCountMatrix::from_rows(2, vec![vec![(2, 1)]]),
        Err(MatrixError::ColumnOutOfRange {
            column: 2,
            vocabulary: 2
        })
    );
    assert!(matches!(
        TermCountMatrix::from_dense(vec![vec![1, 2], vec![3]]),
        Err(MatrixError::Ragged { row: 1, .. })
    ));
}

#[test]
fn buckets_must_be_aligned() {
    let counts = TermCountMatrix::from_dense(vec![vec![1, 0], vec![0, 1]]).unwrap();
    let vocabulary = Vocabulary::from_terms(["a", "b"]).unwrap();

    let misaligned = Buckets::new(counts.clone(), vocabulary.clone(), vec![date("2018-01-01")]);
    assert!(matches!(misaligned, Err(MatrixError::Misaligned { what: "dates", .. })));

    let unordered = Buckets::new(
        counts.clone(),
        vocabulary.clone(),
        vec![date("2018-01-02"), date("2018-01-01")],
    );
    assert!(matches!(unordered, Err(MatrixError::UnorderedDates { .. })));

    let short_vocabulary = Vocabulary::from_terms(["a"]).unwrap();
    let result = Buckets::new(counts, short_vocabulary, vec![date("2018-01-01"), date("2018-01-02")]);
    assert!(matches!(result, Err(MatrixError::Misaligned { what: "vocabulary", .. })));
}

#[test]
fn vocabulary_rejects_duplicates() {
    assert_eq!(
        Vocabulary::from_terms(["a", "b", "a"]),
        Err(MatrixError::DuplicateTerm("a".into()))
    );
}
