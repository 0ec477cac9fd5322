use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Date keys must be non-decreasing: {previous} is followed by {date}")]
    OutOfOrder { previous: NaiveDate, date: NaiveDate },
}

/// Documents published on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatedDocuments {
    pub date: NaiveDate,
    pub documents: Vec<String>,
}

/// Read-only access to documents keyed by date.
///
/// Implementations materialize their data up front; none of these calls
/// perform I/O.
pub trait DocumentStore {
    /// Distinct dates in ascending order.
    fn dates(&self) -> Vec<NaiveDate>;

    fn documents_on(&self, date: NaiveDate) -> Vec<&str>;

    /// Documents dated within `[begin, end]`, ordered by date.
    fn documents_between(&self, begin: NaiveDate, end: NaiveDate) -> Vec<&str> {
        self.dates()
            .into_iter()
            .filter(|d| (begin..=end).contains(d))
            .flat_map(|d| self.documents_on(d))
            .collect()
    }

    /// Non-blank sentences of the documents within `[begin, end]`, trimmed.
    fn sentences_between(&self, begin: NaiveDate, end: NaiveDate, separator: &str) -> Vec<String> {
        self.documents_between(begin, end)
            .into_iter()
            .flat_map(|doc| doc.split(separator))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A single materialized source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStore {
    days: BTreeMap<NaiveDate, Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an ordered sequence of dated document lists. Repeated dates
    /// are appended; a date earlier than its predecessor is rejected.
    pub fn from_days<I>(days: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = DatedDocuments>,
    {
        let mut store = Self::new();
        let mut previous: Option<NaiveDate> = None;
        for day in days {
            if let Some(previous) = previous {
                if day.date < previous {
                    return Err(StoreError::OutOfOrder {
                        previous,
                        date: day.date,
                    });
                }
            }
            previous = Some(day.date);
            store.days.entry(day.date).or_default().extend(day.documents);
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }
}

impl DocumentStore for InMemoryStore {
    fn dates(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    fn documents_on(&self, date: NaiveDate) -> Vec<&str> {
        self.days
            .get(&date)
            .map(|docs| docs.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Several sources seen as one. Documents of a date follow source order.
pub struct MergedStore<'a> {
    sources: Vec<&'a dyn DocumentStore>,
}

impl<'a> MergedStore<'a> {
    pub fn new(sources: Vec<&'a dyn DocumentStore>) -> Self {
        Self { sources }
    }
}

impl DocumentStore for MergedStore<'_> {
    fn dates(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self.sources.iter().flat_map(|s| s.dates()).collect();
        dates.into_iter().collect()
    }

    fn documents_on(&self, date: NaiveDate) -> Vec<&str> {
        self.sources
            .iter()
            .flat_map(|s| s.documents_on(date))
            .collect()
    }
}

/// Materialize a directory of `YYYY-MM-DD*.txt` files, one document per line.
///
/// Files whose names do not start with a date are skipped. Several files may
/// share a date; they are read in file-name order.
pub fn load_directory(dir: &Path) -> Result<InMemoryStore, StoreError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut days: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let date = name
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok());
        let Some(date) = date else {
            warn!(file = %path.display(), "skipping file without a date prefix");
            continue;
        };

        let content = fs::read_to_string(&path)?;
        let documents = days.entry(date).or_default();
        documents.extend(
            content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
        );
    }

    debug!(dir = %dir.display(), dates = days.len(), "loaded document directory");
    InMemoryStore::from_days(
        days.into_iter()
            .map(|(date, documents)| DatedDocuments { date, documents }),
    )
}
