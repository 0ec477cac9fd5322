use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid segmentation threshold: {0}")]
    InvalidThreshold(f64),
    #[error("Invalid segment lengths: min_length {min_length}, max_length {max_length}")]
    InvalidLengths { min_length: usize, max_length: usize },
    #[error("Invalid reference size: {0}")]
    InvalidReferenceSize(f64),
    #[error("Diversity must lie in [0, 1], got {0}")]
    InvalidDiversity(f64),
    #[error("Sentence separator must not be empty")]
    EmptySeparator,
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// Config values feed the timeline version hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Dissimilarity above which buckets are not considered coherent.
    pub threshold: f64,
    pub min_length: usize,
    pub max_length: usize,
}

impl SegmentationConfig {
    pub fn v0() -> Self {
        Self {
            threshold: 0.4,
            min_length: 2,
            max_length: 20,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.min_length == 0 || self.min_length > self.max_length {
            return Err(ConfigError::InvalidLengths {
                min_length: self.min_length,
                max_length: self.max_length,
            });
        }
        Ok(())
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self::v0()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Buckets between the segment and its reference window.
    pub margin: usize,
    /// Reference window length as a multiple of the segment length.
    pub ref_size: f64,
    /// Candidates kept by raw in-segment frequency.
    pub num_candidates: usize,
    /// Keywords kept from the candidates by distinctiveness.
    pub num_keywords: usize,
}

impl KeywordConfig {
    pub fn v0() -> Self {
        Self {
            margin: 10,
            ref_size: 5.0,
            num_candidates: 300,
            num_keywords: 60,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ref_size.is_finite() || self.ref_size < 0.0 {
            return Err(ConfigError::InvalidReferenceSize(self.ref_size));
        }
        Ok(())
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self::v0()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub num_keysents: usize,
    /// Minimum cosine distance between two selected sentences.
    pub diversity: f64,
    /// Separator between sentences inside a stored document.
    pub sentence_separator: String,
}

impl SummaryConfig {
    pub fn v0() -> Self {
        Self {
            num_keysents: 5,
            diversity: 0.6,
            sentence_separator: "  ".into(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.diversity) {
            return Err(ConfigError::InvalidDiversity(self.diversity));
        }
        if self.sentence_separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        Ok(())
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self::v0()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub keywords: KeywordConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
}

impl TimelineConfig {
    pub fn v0() -> Self {
        Self::default()
    }

    /// Parse and validate. Missing sections fall back to their v0 defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: TimelineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.segmentation.validate()?;
        self.keywords.validate()?;
        self.summary.validate()
    }
}
