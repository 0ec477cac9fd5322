pub mod segmenter;

pub use segmenter::{point_shift, SegmentationError, Segmenter};
