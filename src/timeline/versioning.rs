use sha2::{Digest, Sha256};

use crate::config::TimelineConfig;
use crate::types::TimelineEntry;

/// Content version of a timeline: sha256 over the config followed by every
/// entry, all as JSON.
///
/// The penalty function is code, not data, and is not part of the hash.
pub fn timeline_version(
    config: &TimelineConfig,
    entries: &[TimelineEntry],
) -> Result<String, serde_json::Error> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(config)?);
    for entry in entries {
        hasher.update(serde_json::to_vec(entry)?);
    }
    Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
}
