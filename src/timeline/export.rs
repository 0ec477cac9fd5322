use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Timeline;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Output directory already exists: {0}")]
    OutputExists(PathBuf),
    #[error("Timeline version mismatch: manifest says {manifest}, timeline says {timeline}")]
    VersionMismatch { manifest: String, timeline: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineManifest {
    pub timeline_version: String,
    pub created_at: DateTime<Utc>, // informational only
    pub entry_count: usize,
    pub period_begin: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

/// Writes a timeline as `timeline.json` + `manifest.json`.
///
/// Output is staged in a sibling temp directory and renamed into place, so a
/// reader never observes a partial export.
pub struct TimelineExporter;

impl TimelineExporter {
    pub fn write(timeline: &Timeline, output_dir: &Path) -> Result<TimelineManifest, ExportError> {
        if output_dir.exists() {
            return Err(ExportError::OutputExists(output_dir.to_path_buf()));
        }

        let version = &timeline.metadata.timeline_version;
        let manifest = TimelineManifest {
            timeline_version: version.clone(),
            created_at: Utc::now(),
            entry_count: timeline.entries.len(),
            period_begin: timeline.entries.first().map(|e| e.period_begin),
            period_end: timeline.entries.last().map(|e| e.period_end),
        };

        // Temp dir keyed by the first 12 hex chars of the version
        let fragment = version
            .strip_prefix("sha256:")
            .and_then(|hex| hex.get(..12))
            .unwrap_or("unversioned");
        let temp_dir = output_dir.with_extension(format!("tmp.{fragment}"));

        // Stale temp dir from a crashed export of this same version
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir)?;
        }
        fs::create_dir_all(&temp_dir)?;

        let f_timeline = fs::File::create(temp_dir.join("timeline.json"))?;
        serde_json::to_writer_pretty(&f_timeline, timeline)?;
        f_timeline.sync_all()?;

        let f_manifest = fs::File::create(temp_dir.join("manifest.json"))?;
        serde_json::to_writer_pretty(&f_manifest, &manifest)?;
        f_manifest.sync_all()?;

        fs::rename(&temp_dir, output_dir)?;

        Ok(manifest)
    }

    /// Load an export, checking the manifest against the timeline it describes.
    pub fn read(dir: &Path) -> Result<(Timeline, TimelineManifest), ExportError> {
        let timeline: Timeline =
            serde_json::from_reader(fs::File::open(dir.join("timeline.json"))?)?;
        let manifest: TimelineManifest =
            serde_json::from_reader(fs::File::open(dir.join("manifest.json"))?)?;

        if manifest.timeline_version != timeline.metadata.timeline_version {
            return Err(ExportError::VersionMismatch {
                manifest: manifest.timeline_version,
                timeline: timeline.metadata.timeline_version,
            });
        }
        Ok((timeline, manifest))
    }
}
