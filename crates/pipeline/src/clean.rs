use crate::detection::{DataError, Detection};
use crate::filter::filter_by_confidence;
use crate::nms::non_max_suppression;

/// Shared post-processing entry used by every consumer of the cleaned set:
/// validate the raw predictions, drop low-confidence ones, then deduplicate
/// overlapping boxes.
///
/// Pure and synchronous; each call owns its detection set, so concurrent
/// requests share no state.
#[tracing::instrument(skip(detections), fields(input = detections.len()))]
pub fn clean(
    detections: Vec<Detection>,
    confidence_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<Detection>, DataError> {
    for detection in &detections {
        detection.validate()?;
    }

    let filtered = filter_by_confidence(detections, confidence_threshold);
    let kept = non_max_suppression(filtered, iou_threshold);

    tracing::debug!(kept = kept.len(), "Detection set cleaned");

    Ok(kept)
}
