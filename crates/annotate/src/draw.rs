use crate::AnnotateError;
use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use pipeline::{BBox, Detection};
use std::path::Path;

const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 255]);
const BOX_STROKE: i32 = 3;
const LABEL_FONT_SIZE: f32 = 16.0;
const LABEL_OFFSET: i32 = 18;

/// Font locations tried when no path is configured.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
];

/// Label shown above each box.
pub fn label_text(detection: &Detection) -> String {
    format!(
        "{} {}%",
        detection.class,
        (detection.confidence * 100.0).round() as i32
    )
}

/// Draws cleaned detections onto the source image: a magenta box outline at a
/// fixed stroke weight plus the class/confidence label above the top edge.
pub struct Annotator {
    font: FontArc,
    font_scale: PxScale,
}

impl Annotator {
    pub fn from_font_path(path: &Path) -> Result<Self, AnnotateError> {
        let bytes = std::fs::read(path).map_err(|source| AnnotateError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontArc::try_from_vec(bytes).map_err(|_| AnnotateError::FontParse {
            path: path.to_path_buf(),
        })?;
        Ok(Self {
            font,
            font_scale: PxScale::from(LABEL_FONT_SIZE),
        })
    }

    /// Load the label font from the configured path, or search the usual
    /// system locations. A missing font is a startup error, not a silent
    /// fallback to unlabeled boxes.
    pub fn load(configured: Option<&Path>) -> Result<Self, AnnotateError> {
        if let Some(path) = configured {
            return Self::from_font_path(path);
        }
        for candidate in FONT_SEARCH_PATHS {
            let path = Path::new(candidate);
            if path.exists() {
                match Self::from_font_path(path) {
                    Ok(annotator) => {
                        tracing::debug!(font = candidate, "Label font loaded");
                        return Ok(annotator);
                    }
                    Err(e) => {
                        tracing::warn!(font = candidate, error = %e, "Skipping unusable font");
                    }
                }
            }
        }
        Err(AnnotateError::FontUnavailable)
    }

    pub fn draw(&self, image: &mut RgbImage, detections: &[Detection]) {
        for detection in detections {
            let bbox = detection.bbox();
            draw_box(image, &bbox);

            let x = (bbox.x_min.floor() as i32).max(0);
            let y = (bbox.y_min.floor() as i32 - LABEL_OFFSET).max(0);
            draw_text_mut(
                image,
                BOX_COLOR,
                x,
                y,
                self.font_scale,
                &self.font,
                &label_text(detection),
            );
        }
    }
}

/// Hollow rectangle at the fixed stroke weight, clamped to the image bounds.
fn draw_box(image: &mut RgbImage, bbox: &BBox) {
    let (w, h) = (image.width() as i32, image.height() as i32);
    if w == 0 || h == 0 {
        return;
    }
    let x_min = (bbox.x_min.floor() as i32).clamp(0, w - 1);
    let y_min = (bbox.y_min.floor() as i32).clamp(0, h - 1);
    let x_max = (bbox.x_max.ceil() as i32).clamp(0, w - 1);
    let y_max = (bbox.y_max.ceil() as i32).clamp(0, h - 1);

    if x_max <= x_min || y_max <= y_min {
        return;
    }

    for inset in 0..BOX_STROKE {
        let x0 = x_min + inset;
        let y0 = y_min + inset;
        let x1 = x_max - inset;
        let y1 = y_max - inset;
        if x1 <= x0 || y1 <= y0 {
            break;
        }
        let rect = Rect::at(x0, y0).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
        draw_hollow_rect_mut(image, rect, BOX_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a detection in center form
    fn detection(class: &str, confidence: f32, x: f32, y: f32, w: f32, h: f32) -> Detection {
        Detection {
            class: class.to_string(),
            confidence,
            x,
            y,
            width: w,
            height: h,
        }
    }

    #[test]
    fn label_rounds_confidence_to_whole_percent() {
        assert_eq!(
            label_text(&detection("cat", 0.77, 0.0, 0.0, 1.0, 1.0)),
            "cat 77%"
        );
        assert_eq!(
            label_text(&detection("dog", 0.999, 0.0, 0.0, 1.0, 1.0)),
            "dog 100%"
        );
        assert_eq!(
            label_text(&detection("bird", 0.5, 0.0, 0.0, 1.0, 1.0)),
            "bird 50%"
        );
    }

    #[test]
    fn box_outline_has_three_pixel_stroke() {
        let mut img = RgbImage::new(40, 40);
        let bbox = BBox {
            x_min: 10.0,
            y_min: 10.0,
            x_max: 30.0,
            y_max: 30.0,
        };
        draw_box(&mut img, &bbox);

        // Outline corner plus the two inset strokes
        assert_eq!(*img.get_pixel(10, 10), BOX_COLOR);
        assert_eq!(*img.get_pixel(11, 11), BOX_COLOR);
        assert_eq!(*img.get_pixel(12, 12), BOX_COLOR);
        // Bottom edge of the outermost stroke
        assert_eq!(*img.get_pixel(20, 30), BOX_COLOR);
        // Inside the stroke band and box interior stay untouched
        assert_eq!(*img.get_pixel(13, 13), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(20, 20), Rgb([0, 0, 0]));
        // Outside the box stays untouched
        assert_eq!(*img.get_pixel(5, 5), Rgb([0, 0, 0]));
    }

    #[test]
    fn box_partially_outside_the_image_is_clamped() {
        let mut img = RgbImage::new(20, 20);
        let bbox = BBox {
            x_min: -5.0,
            y_min: -5.0,
            x_max: 10.0,
            y_max: 10.0,
        };
        draw_box(&mut img, &bbox);
        assert_eq!(*img.get_pixel(0, 0), BOX_COLOR);
        assert_eq!(*img.get_pixel(10, 5), BOX_COLOR);
    }

    #[test]
    fn empty_image_draws_nothing() {
        let mut img = RgbImage::new(0, 0);
        let bbox = BBox {
            x_min: 0.0,
            y_min: 0.0,
            x_max: 10.0,
            y_max: 10.0,
        };
        draw_box(&mut img, &bbox);
        assert_eq!(img.dimensions(), (0, 0));
    }

    #[test]
    fn degenerate_box_draws_nothing() {
        let mut img = RgbImage::new(20, 20);
        let bbox = BBox {
            x_min: 5.0,
            y_min: 5.0,
            x_max: 5.0,
            y_max: 5.0,
        };
        draw_box(&mut img, &bbox);
        assert!(img.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn annotator_draws_labels_when_a_system_font_exists() {
        // Runs only on machines that have one of the searched fonts.
        let Ok(annotator) = Annotator::load(None) else {
            return;
        };
        let mut img = RgbImage::new(100, 100);
        annotator.draw(&mut img, &[detection("cat", 0.9, 50.0, 50.0, 30.0, 30.0)]);
        assert!(img.pixels().any(|p| *p == BOX_COLOR));
    }
}
