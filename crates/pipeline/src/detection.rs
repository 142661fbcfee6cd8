use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A raw prediction from the inference provider: a center-form box in image
/// pixel space with a class label and a confidence score.
///
/// Detections are immutable once produced; the pipeline filters, selects and
/// projects them but never rewrites fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class: String,
    pub confidence: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataError {
    #[error("non-finite `{field}` ({value}) in detection for class `{class}`")]
    NonFinite {
        class: String,
        field: &'static str,
        value: f32,
    },
    #[error("negative `{field}` ({value}) in detection for class `{class}`")]
    NegativeDimension {
        class: String,
        field: &'static str,
        value: f32,
    },
}

impl Detection {
    /// Corner-form view of the box: `(x - w/2, y - h/2, x + w/2, y + h/2)`.
    /// For non-negative dimensions `x_min <= x_max` and `y_min <= y_max`.
    pub fn bbox(&self) -> BBox {
        BBox {
            x_min: self.x - self.width / 2.0,
            y_min: self.y - self.height / 2.0,
            x_max: self.x + self.width / 2.0,
            y_max: self.y + self.height / 2.0,
        }
    }

    /// Reject malformed detections before they enter the pipeline. No repair
    /// is attempted.
    pub fn validate(&self) -> Result<(), DataError> {
        let fields = [
            ("confidence", self.confidence),
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(DataError::NonFinite {
                    class: self.class.clone(),
                    field,
                    value,
                });
            }
        }
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value < 0.0 {
                return Err(DataError::NegativeDimension {
                    class: self.class.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Axis-aligned box in corner form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub fn area(&self) -> f32 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a detection with the given geometry and a fixed class
    fn detection(confidence: f32, x: f32, y: f32, width: f32, height: f32) -> Detection {
        Detection {
            class: "cat".to_string(),
            confidence,
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn bbox_converts_center_form_to_corners() {
        let d = detection(0.9, 50.0, 50.0, 20.0, 10.0);
        let b = d.bbox();
        assert_eq!(b.x_min, 40.0);
        assert_eq!(b.y_min, 45.0);
        assert_eq!(b.x_max, 60.0);
        assert_eq!(b.y_max, 55.0);
    }

    #[test]
    fn validate_accepts_well_formed_detection() {
        assert!(detection(0.5, 10.0, 10.0, 5.0, 5.0).validate().is_ok());
    }

    #[test]
    fn validate_accepts_zero_area_box() {
        assert!(detection(0.5, 10.0, 10.0, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_coordinates() {
        let err = detection(0.5, f32::NAN, 10.0, 5.0, 5.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DataError::NonFinite { field: "x", .. }));

        let err = detection(0.5, 10.0, 10.0, f32::INFINITY, 5.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DataError::NonFinite { field: "width", .. }));
    }

    #[test]
    fn validate_rejects_non_finite_confidence() {
        let err = detection(f32::NAN, 10.0, 10.0, 5.0, 5.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::NonFinite {
                field: "confidence",
                ..
            }
        ));
    }

    #[test]
    fn validate_rejects_negative_dimensions() {
        let err = detection(0.5, 10.0, 10.0, -1.0, 5.0).validate().unwrap_err();
        assert!(matches!(
            err,
            DataError::NegativeDimension { field: "width", .. }
        ));
    }
}
