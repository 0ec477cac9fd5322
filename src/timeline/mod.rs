pub mod builder;
pub mod export;
pub mod versioning;

pub use builder::{TimelineBuilder, TimelineError};
pub use export::{ExportError, TimelineExporter, TimelineManifest};
pub use versioning::timeline_version;
