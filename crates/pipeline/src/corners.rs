use crate::detection::Detection;
use serde::Serialize;

/// Four-corner projection of one surviving detection.
///
/// The field names are part of the response contract and must serialize
/// exactly as written here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CornerRecord {
    pub class: String,
    pub confidence: f32,
    pub top_left: [f32; 2],
    pub top_right: [f32; 2],
    pub bottom_left: [f32; 2],
    pub bottom_right: [f32; 2],
}

impl From<&Detection> for CornerRecord {
    fn from(detection: &Detection) -> Self {
        let b = detection.bbox();
        Self {
            class: detection.class.clone(),
            confidence: detection.confidence,
            top_left: [b.x_min, b.y_min],
            top_right: [b.x_max, b.y_min],
            bottom_left: [b.x_min, b.y_max],
            bottom_right: [b.x_max, b.y_max],
        }
    }
}

/// Project the cleaned detection set, preserving its order.
pub fn corner_records(detections: &[Detection]) -> Vec<CornerRecord> {
    detections.iter().map(CornerRecord::from).collect()
}
