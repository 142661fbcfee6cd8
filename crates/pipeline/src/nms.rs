use crate::detection::Detection;
use crate::iou::iou;

/// Greedy non-maximum suppression over axis-aligned boxes.
///
/// Repeatedly selects the highest-confidence remaining detection and discards
/// every remaining detection whose IoU with it is `>= iou_threshold`. Ties in
/// confidence keep their original relative order (stable sort). Suppression is
/// class-agnostic: a box of one class suppresses an overlapping box of any
/// other class.
///
/// The selection loop walks a sorted index order with a suppression mask, so
/// each round removes at least the selected index and the loop runs at most
/// `|input|` rounds. Output is in selection order (descending confidence of
/// the survivors).
pub fn non_max_suppression(detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    let mut order: Vec<usize> = (0..detections.len()).collect();
    order.sort_by(|&a, &b| detections[b].confidence.total_cmp(&detections[a].confidence));

    let boxes: Vec<_> = detections.iter().map(Detection::bbox).collect();
    let mut suppressed = vec![false; detections.len()];
    let mut keep = Vec::new();

    for (rank, &idx) in order.iter().enumerate() {
        if suppressed[idx] {
            continue;
        }
        keep.push(idx);
        for &other in &order[rank + 1..] {
            if !suppressed[other] && iou(&boxes[idx], &boxes[other]) >= iou_threshold {
                suppressed[other] = true;
            }
        }
    }

    keep.into_iter().map(|i| detections[i].clone()).collect()
}
