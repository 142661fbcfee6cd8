use crate::detection::Detection;

/// Keep detections with `confidence >= threshold`, preserving relative order.
///
/// The threshold is accepted as-is: values outside [0, 1] are not clamped or
/// rejected, matching the permissive request contract.
pub fn filter_by_confidence(detections: Vec<Detection>, threshold: f32) -> Vec<Detection> {
    detections
        .into_iter()
        .filter(|d| d.confidence >= threshold)
        .collect()
}
