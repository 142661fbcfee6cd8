pub mod clean;
pub mod corners;
pub mod detection;
pub mod filter;
pub mod iou;
pub mod nms;

// Re-export commonly used types for convenience
pub use clean::clean;
pub use corners::{CornerRecord, corner_records};
pub use detection::{BBox, DataError, Detection};
pub use filter::filter_by_confidence;
pub use iou::iou;
pub use nms::non_max_suppression;
