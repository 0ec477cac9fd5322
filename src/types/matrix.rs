use std::collections::BTreeMap;
use std::ops::Range;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("Matrix must be square: row {row} has {found} columns, expected {expected}")]
    NotSquare {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Column {column} out of range for a vocabulary of {vocabulary} terms")]
    ColumnOutOfRange { column: usize, vocabulary: usize },
    #[error("Duplicate vocabulary term: {0}")]
    DuplicateTerm(String),
    #[error("Misaligned {what}: expected {expected}, found {found}")]
    Misaligned {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Bucket dates must be non-decreasing: {previous} is followed by {date}")]
    UnorderedDates { previous: NaiveDate, date: NaiveDate },
}

/// Symmetric N×N dissimilarity between time buckets, stored row-major.
///
/// Values are conventionally in `[0, 2]` (cosine distance). How the
/// underlying period vectors were produced is irrelevant here.
#[derive(Debug, Clone, PartialEq)]
pub struct DissimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DissimilarityMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != n {
                return Err(MatrixError::NotSquare {
                    row,
                    found: cells.len(),
                    expected: n,
                });
            }
            values.extend(cells);
        }
        Ok(Self { n, values })
    }

    pub fn from_fn(n: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                values.push(f(i, j));
            }
        }
        Self { n, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// `None` when either index is out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.n || column >= self.n {
            return None;
        }
        self.values.get(row * self.n + column).copied()
    }

    /// Mean over the block `rows × columns`, clipped to the matrix.
    /// Returns `None` when the clipped block is empty.
    pub fn block_mean(&self, rows: Range<usize>, columns: Range<usize>) -> Option<f64> {
        let rows = rows.start.min(self.n)..rows.end.min(self.n);
        let columns = columns.start.min(self.n)..columns.end.min(self.n);
        let cells = rows.len() * columns.len();
        if cells == 0 {
            return None;
        }

        let mut sum = 0.0;
        for i in rows {
            let offset = i * self.n;
            sum += self.values[offset + columns.start..offset + columns.end]
                .iter()
                .sum::<f64>();
        }
        Some(sum / cells as f64)
    }
}

/// Index ↔ term bijection for the columns of a [`TermCountMatrix`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: BTreeMap<String, usize>,
}

impl Vocabulary {
    pub fn from_terms<I, S>(terms: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = Vocabulary::default();
        for term in terms {
            let term = term.into();
            if vocabulary.index.contains_key(&term) {
                return Err(MatrixError::DuplicateTerm(term));
            }
            vocabulary.index.insert(term.clone(), vocabulary.terms.len());
            vocabulary.terms.push(term);
        }
        Ok(vocabulary)
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Sparse bucket × term counts in compressed sparse row layout.
///
/// Row `i`'s entries live at `row_ptr[i]..row_ptr[i + 1]`, sorted by column,
/// with no explicit zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCountMatrix {
    vocabulary_size: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    counts: Vec<u32>,
}

impl TermCountMatrix {
    /// Build from per-bucket `(column, count)` lists. Repeated columns within a
    /// row are summed.
    pub fn from_rows(
        vocabulary_size: usize,
        rows: Vec<Vec<(usize, u32)>>,
    ) -> Result<Self, MatrixError> {
        let mut row_ptr = Vec::with_capacity(rows.len() + 1);
        let mut col_idx = Vec::new();
        let mut counts = Vec::new();
        row_ptr.push(0);

        for row in rows {
            let mut merged: BTreeMap<usize, u32> = BTreeMap::new();
            for (column, count) in row {
                if column >= vocabulary_size {
                    return Err(MatrixError::ColumnOutOfRange {
                        column,
                        vocabulary: vocabulary_size,
                    });
                }
                *merged.entry(column).or_insert(0) += count;
            }
            for (column, count) in merged.into_iter().filter(|(_, c)| *c > 0) {
                col_idx.push(column);
                counts.push(count);
            }
            row_ptr.push(col_idx.len());
        }

        Ok(Self {
            vocabulary_size,
            row_ptr,
            col_idx,
            counts,
        })
    }

    /// Build from dense rows; every row must have the same width.
    pub fn from_dense(rows: Vec<Vec<u32>>) -> Result<Self, MatrixError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut sparse = Vec::with_capacity(rows.len());
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(MatrixError::Ragged {
                    row,
                    found: cells.len(),
                    expected: width,
                });
            }
            sparse.push(cells.into_iter().enumerate().collect());
        }
        Self::from_rows(width, sparse)
    }

    pub fn buckets(&self) -> usize {
        self.row_ptr.len() - 1
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    fn row_span(&self, bucket: usize) -> Option<(usize, usize)> {
        let start = *self.row_ptr.get(bucket)?;
        let end = *self.row_ptr.get(bucket + 1)?;
        Some((start, end))
    }

    /// Non-zero `(column, count)` pairs of one bucket, in column order. A
    /// bucket outside the matrix has none.
    pub fn row(&self, bucket: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        let (start, end) = self.row_span(bucket).unwrap_or((0, 0));
        self.col_idx[start..end]
            .iter()
            .copied()
            .zip(self.counts[start..end].iter().copied())
    }

    /// Count at `(bucket, column)`, `None` outside the matrix.
    pub fn get(&self, bucket: usize, column: usize) -> Option<u32> {
        if column >= self.vocabulary_size {
            return None;
        }
        let (start, end) = self.row_span(bucket)?;
        let count = self.col_idx[start..end]
            .binary_search(&column)
            .map(|pos| self.counts[start + pos])
            .unwrap_or(0);
        Some(count)
    }
}

/// Term counts, vocabulary and calendar dates aligned bucket-for-bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets {
    pub counts: TermCountMatrix,
    pub vocabulary: Vocabulary,
    pub dates: Vec<NaiveDate>,
}

impl Buckets {
    pub fn new(
        counts: TermCountMatrix,
        vocabulary: Vocabulary,
        dates: Vec<NaiveDate>,
    ) -> Result<Self, MatrixError> {
        if vocabulary.len() != counts.vocabulary_size() {
            return Err(MatrixError::Misaligned {
                what: "vocabulary",
                expected: counts.vocabulary_size(),
                found: vocabulary.len(),
            });
        }
        if dates.len() != counts.buckets() {
            return Err(MatrixError::Misaligned {
                what: "dates",
                expected: counts.buckets(),
                found: dates.len(),
            });
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[1] < pair[0]) {
            return Err(MatrixError::UnorderedDates {
                previous: pair[0],
                date: pair[1],
            });
        }

        Ok(Self {
            counts,
            vocabulary,
            dates,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
