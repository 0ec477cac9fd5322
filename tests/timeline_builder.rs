use chrono::NaiveDate;
use timeline_core::config::{KeywordConfig, SegmentationConfig, SummaryConfig, TimelineConfig};
use timeline_core::document::{DatedDocuments, InMemoryStore};
use timeline_core::summary::NoPenalty;
use timeline_core::timeline::{TimelineBuilder, TimelineError};
use timeline_core::types::{
    Buckets, DissimilarityMatrix, Keyword, Segment, TermCountMatrix, TimelineEntry, Vocabulary,
};

const BLOCKS: [usize; 10] = [0, 1, 1, 1, 1, 2, 2, 2, 3, 3];

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn distances() -> DissimilarityMatrix {
    DissimilarityMatrix::from_fn(BLOCKS.len(), |i, j| {
        if i == j {
            0.0
        } else if BLOCKS[i] == BLOCKS[j] {
            0.1
        } else {
            0.9
        }
    })
}

fn buckets() -> Buckets {
    // election, vote, the, storm, rain
    let counts = TermCountMatrix::from_dense(vec![
        vec![0, 0, 5, 2, 0],
        vec![0, 0, 5, 2, 0],
        vec![4, 2, 5, 0, 0],
        vec![3, 1, 5, 0, 0],
        vec![3, 1, 5, 0, 0],
        vec![0, 0, 5, 0, 3],
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 5, 0, 2],
        vec![0, 0, 5, 0, 2],
    ])
    .unwrap();
    let vocabulary = Vocabulary::from_terms(["election", "vote", "the", "storm", "rain"]).unwrap();
    let start = date("2018-01-01");
    let dates = (0..10).map(|i| start + chrono::Days::new(i)).collect();
    Buckets::new(counts, vocabulary, dates).unwrap()
}

fn store() -> InMemoryStore {
    let day = |d: &str, doc: &str| DatedDocuments {
        date: date(d),
        documents: vec![doc.to_string()],
    };
    InMemoryStore::from_days(vec![
        day("2018-01-01", "the storm hit the coast  storm warnings issued"),
        day(
            "2018-01-03",
            "the election vote was held  the election vote was held today",
        ),
        day("2018-01-04", "election officials met"),
        day("2018-01-05", "the storm hit the coast"),
        day("2018-01-06", "rain expected"),
    ])
    .unwrap()
}

fn config() -> TimelineConfig {
    TimelineConfig {
        segmentation: SegmentationConfig {
            threshold: 0.4,
            min_length: 2,
            max_length: 5,
        },
        keywords: KeywordConfig {
            margin: 0,
            ref_size: 1.0,
            num_candidates: 10,
            num_keywords: 3,
        },
        summary: SummaryConfig {
            num_keysents: 3,
            diversity: 0.3,
            sentence_separator: "  ".into(),
        },
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn end_to_end_timeline() {
    let builder = TimelineBuilder::new(config()).unwrap().with_penalty(NoPenalty);
    let timeline = builder.build(&distances(), &buckets(), &store()).unwrap();

    assert_eq!(timeline.metadata.buckets, 10);
    assert_eq!(timeline.metadata.segments_found, 2);
    // [6, 8) has no counts at all
    assert_eq!(timeline.metadata.segments_skipped, 1);
    assert_eq!(timeline.metadata.entries, 1);
    assert_eq!(timeline.entries.len(), 1);

    let entry = &timeline.entries[0];
    assert_eq!(entry.segment, Segment::new(2, 5));
    assert_eq!(entry.period_begin, date("2018-01-03"));
    assert_eq!(entry.period_end, date("2018-01-05"));

    let terms: Vec<&str> = entry.keywords.iter().map(|k| k.term.as_str()).collect();
    assert_eq!(terms, vec!["election", "vote", "the"]);
    assert_close(entry.keywords[0].score, 1.0);
    assert_close(entry.keywords[0].proportion, 10.0 / 29.0);
    assert_close(entry.keywords[1].score, 1.0);
    assert_close(entry.keywords[1].proportion, 4.0 / 29.0);
    let (pos, reference) = (15.0 / 29.0, 20.0 / 28.0);
    assert_close(entry.keywords[2].score, pos / (pos + reference));
    assert_close(entry.keywords[2].proportion, pos);

    assert_eq!(
        entry.keysentences,
        vec![
            "the election vote was held".to_string(),
            "election officials met".to_string(),
            "the storm hit the coast".to_string(),
        ]
    );
}

#[test]
fn default_penalty_prefers_sentences_closer_to_preferred_length() {
    let builder = TimelineBuilder::new(config()).unwrap();
    let timeline = builder.build(&distances(), &buckets(), &store()).unwrap();

    // Six words sit closer to the preferred range than five.
    assert_eq!(
        timeline.entries[0].keysentences,
        vec![
            "the election vote was held today".to_string(),
            "election officials met".to_string(),
            "the storm hit the coast".to_string(),
        ]
    );
}

#[test]
fn builds_are_deterministic() {
    let builder = TimelineBuilder::new(config()).unwrap();
    let first = builder.build(&distances(), &buckets(), &store()).unwrap();
    let second = builder.build(&distances(), &buckets(), &store()).unwrap();

    assert_eq!(first, second);
    let version = &first.metadata.timeline_version;
    assert!(version.starts_with("sha256:"));
    assert_eq!(version.len(), 71);
}

#[test]
fn version_tracks_config() {
    let base = TimelineBuilder::new(config()).unwrap();
    let mut other_config = config();
    other_config.keywords.num_candidates = 11;
    let other = TimelineBuilder::new(other_config).unwrap();

    let a = base.build(&distances(), &buckets(), &store()).unwrap();
    let b = other.build(&distances(), &buckets(), &store()).unwrap();

    assert_eq!(a.entries, b.entries);
    assert_ne!(a.metadata.timeline_version, b.metadata.timeline_version);
}

#[test]
fn misaligned_inputs_are_rejected() {
    let builder = TimelineBuilder::new(config()).unwrap();
    let short = DissimilarityMatrix::from_fn(4, |i, j| if i == j { 0.0 } else { 0.5 });

    let result = builder.build(&short, &buckets(), &store());
    assert!(matches!(
        result,
        Err(TimelineError::Misaligned {
            distances: 4,
            buckets: 10
        })
    ));
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut bad = config();
    bad.summary.diversity = 1.5;
    assert!(matches!(
        TimelineBuilder::new(bad),
        Err(TimelineError::Config(_))
    ));
}

#[test]
fn precomputed_segments_are_summarized_in_order() {
    let builder = TimelineBuilder::new(config()).unwrap().with_penalty(NoPenalty);
    let segments = [Segment::new(6, 8), Segment::new(2, 5)];
    let timeline = builder
        .summarize_segments(&segments, &buckets(), &store())
        .unwrap();

    assert_eq!(timeline.metadata.segments_found, 2);
    assert_eq!(timeline.metadata.segments_skipped, 1);
    assert_eq!(timeline.entries[0].segment, Segment::new(2, 5));

    let out_of_range = [Segment::new(8, 12)];
    assert!(matches!(
        builder.summarize_segments(&out_of_range, &buckets(), &store()),
        Err(TimelineError::SegmentOutOfRange {
            begin: 8,
            end: 12,
            buckets: 10
        })
    ));
}

#[test]
fn empty_stream_gives_empty_timeline() {
    let builder = TimelineBuilder::new(config()).unwrap();
    let counts = TermCountMatrix::from_dense(Vec::new()).unwrap();
    let buckets = Buckets::new(counts, Vocabulary::default(), Vec::new()).unwrap();
    let distances = DissimilarityMatrix::from_fn(0, |_, _| 0.0);

    let timeline = builder.build(&distances, &buckets, &store()).unwrap();
    assert!(timeline.entries.is_empty());
    assert_eq!(timeline.metadata.segments_found, 0);
}

#[test]
fn golden_entry_serialization() {
    let entry = TimelineEntry {
        period_begin: date("2018-01-03"),
        period_end: date("2018-01-05"),
        segment: Segment::new(2, 5),
        keywords: vec![Keyword {
            term: "election".into(),
            score: 1.0,
            proportion: 0.5,
        }],
        keysentences: vec!["the election vote was held".into()],
    };

    let expected = r#"{
      "period_begin": "2018-01-03",
      "period_end": "2018-01-05",
      "segment": { "begin": 2, "end": 5, "length": 3 },
      "keywords": [ { "term": "election", "score": 1.0, "proportion": 0.5 } ],
      "keysentences": [ "the election vote was held" ]
    }"#;

    let expected: serde_json::Value = serde_json::from_str(expected).unwrap();
    assert_eq!(serde_json::to_value(&entry).unwrap(), expected);

    // Field order follows the struct
    let json = serde_json::to_string(&entry).unwrap();
    let positions: Vec<usize> = [
        "\"period_begin\":",
        "\"period_end\":",
        "\"segment\":",
        "\"keywords\":",
        "\"keysentences\":",
    ]
    .iter()
    .map(|key| json.find(key).unwrap())
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}
