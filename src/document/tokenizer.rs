use std::collections::BTreeSet;

/// Splits text into words.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// One stage of a word-sequence transform.
pub trait WordFilter {
    fn apply(&self, words: Vec<String>) -> Vec<String>;
}

/// Whitespace split followed by the configured filters, in order.
#[derive(Default)]
pub struct WhitespaceTokenizer {
    filters: Vec<Box<dyn WordFilter + Send + Sync>>,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: impl WordFilter + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let words = text.split_whitespace().map(str::to_string).collect();
        self.filters
            .iter()
            .fold(words, |words, filter| filter.apply(words))
    }
}

/// Drops listed words.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: BTreeSet<String>,
}

impl Stopwords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl WordFilter for Stopwords {
    fn apply(&self, mut words: Vec<String>) -> Vec<String> {
        words.retain(|w| !self.words.contains(w));
        words
    }
}

/// Drops words carrying any of the given part-of-speech tags, e.g. `은/R`.
///
/// Tags are normalized to start with `/`.
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    tags: BTreeSet<String>,
}

impl TagFilter {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = tags
            .into_iter()
            .filter(|t| !t.as_ref().is_empty())
            .map(|t| {
                let t = t.as_ref();
                if t.starts_with('/') {
                    t.to_string()
                } else {
                    format!("/{t}")
                }
            })
            .collect();
        Self { tags }
    }
}

impl WordFilter for TagFilter {
    fn apply(&self, mut words: Vec<String>) -> Vec<String> {
        words.retain(|w| !self.tags.iter().any(|t| w.contains(t.as_str())));
        words
    }
}
