use crate::detection::BBox;

/// Intersection over union of two axis-aligned boxes.
///
/// The intersection is clamped at zero for disjoint boxes, and a zero-area
/// union yields 0 rather than a division fault. Symmetric in its arguments.
pub fn iou(a: &BBox, b: &BBox) -> f32 {
    let inter_x_min = a.x_min.max(b.x_min);
    let inter_y_min = a.y_min.max(b.y_min);
    let inter_x_max = a.x_max.min(b.x_max);
    let inter_y_max = a.y_max.min(b.y_max);

    let inter_width = (inter_x_max - inter_x_min).max(0.0);
    let inter_height = (inter_y_max - inter_y_min).max(0.0);
    let intersection = inter_width * inter_height;

    let union = a.area() + b.area() - intersection;

    if union > 0.0 { intersection / union } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a corner-form box
    fn bbox(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> BBox {
        BBox {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    #[test]
    fn identical_boxes_have_iou_one() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        assert_eq!(iou(&a, &a), 1.0);
    }

    #[test]
    fn disjoint_boxes_have_iou_zero() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        let b = bbox(20.0, 20.0, 30.0, 30.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn touching_boxes_have_iou_zero() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        let b = bbox(10.0, 0.0, 20.0, 10.0);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_is_symmetric() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        let b = bbox(1.0, 1.0, 11.0, 11.0);
        assert_eq!(iou(&a, &b), iou(&b, &a));
    }

    #[test]
    fn overlapping_boxes_match_hand_computed_ratio() {
        // 9x9 intersection over 100 + 100 - 81 union
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        let b = bbox(1.0, 1.0, 11.0, 11.0);
        let expected = 81.0 / 119.0;
        assert!((iou(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn half_overlap_ratio() {
        let a = bbox(0.0, 0.0, 10.0, 10.0);
        let b = bbox(0.0, 5.0, 10.0, 15.0);
        let expected = 50.0 / 150.0;
        assert!((iou(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn zero_area_boxes_yield_zero_not_nan() {
        let a = bbox(5.0, 5.0, 5.0, 5.0);
        assert_eq!(iou(&a, &a), 0.0);
    }

    #[test]
    fn contained_box_ratio_is_area_fraction() {
        let outer = bbox(0.0, 0.0, 10.0, 10.0);
        let inner = bbox(2.0, 2.0, 7.0, 7.0);
        let expected = 25.0 / 100.0;
        assert!((iou(&outer, &inner) - expected).abs() < 1e-6);
    }
}
