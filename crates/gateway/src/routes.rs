use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::header,
    response::IntoResponse,
    routing::post,
};
use opentelemetry::KeyValue;
use pipeline::{CornerRecord, Detection, corner_records};
use std::time::Instant;
use tower_http::cors::CorsLayer;

const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;
const DEFAULT_IOU_THRESHOLD: f32 = 0.3;

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/detect-and-annotate", post(detect_and_annotate))
        .route("/bounding-box-corners", post(bounding_box_corners))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// One detection request: the uploaded image plus the two per-request
/// thresholds.
struct DetectRequest {
    image: Vec<u8>,
    confidence_threshold: f32,
    iou_threshold: f32,
}

async fn read_request(multipart: &mut Multipart) -> Result<DetectRequest, ApiError> {
    let mut image = None;
    let mut confidence_threshold = DEFAULT_CONFIDENCE_THRESHOLD;
    let mut iou_threshold = DEFAULT_IOU_THRESHOLD;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("image") => image = Some(field.bytes().await?.to_vec()),
            Some("confidence") => {
                confidence_threshold = parse_threshold("confidence", &field.text().await?)?;
            }
            Some("iou") => {
                iou_threshold = parse_threshold("iou", &field.text().await?)?;
            }
            // Unknown parts are ignored
            _ => {}
        }
    }

    Ok(DetectRequest {
        image: image.ok_or(ApiError::MissingImage)?,
        confidence_threshold,
        iou_threshold,
    })
}

/// Thresholds must be numbers, but their range is deliberately not validated:
/// out-of-range values pass through to the pipeline as-is.
fn parse_threshold(field: &'static str, value: &str) -> Result<f32, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidNumberField {
            field,
            value: value.to_string(),
        })
}

/// Inference plus the shared post-processing pipeline, used by both endpoints.
async fn run_pipeline(
    state: &AppState,
    request: &DetectRequest,
) -> Result<Vec<Detection>, ApiError> {
    let raw = state.inference.detect(&request.image).await?;
    let cleaned = pipeline::clean(
        raw,
        request.confidence_threshold,
        request.iou_threshold,
    )?;
    state.metrics.detections.add(cleaned.len() as u64, &[]);
    Ok(cleaned)
}

async fn detect_and_annotate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let start = Instant::now();
    let attrs = [KeyValue::new("endpoint", "detect_and_annotate")];
    state.metrics.requests.add(1, &attrs);

    let request = read_request(&mut multipart).await?;
    let cleaned = run_pipeline(&state, &request).await?;

    let mut image = annotate::decode_image(&request.image)?;
    state.annotator.draw(&mut image, &cleaned);
    let jpeg = annotate::encode_jpeg(&image)?;

    state
        .metrics
        .request_duration
        .record(start.elapsed().as_secs_f64(), &attrs);
    tracing::info!(detections = cleaned.len(), "Annotated image served");

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], jpeg))
}

async fn bounding_box_corners(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<CornerRecord>>, ApiError> {
    let start = Instant::now();
    let attrs = [KeyValue::new("endpoint", "bounding_box_corners")];
    state.metrics.requests.add(1, &attrs);

    let request = read_request(&mut multipart).await?;
    let cleaned = run_pipeline(&state, &request).await?;
    let records = corner_records(&cleaned);

    state
        .metrics
        .request_duration
        .record(start.elapsed().as_secs_f64(), &attrs);
    tracing::info!(detections = records.len(), "Corner records served");

    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_parse_as_floats() {
        assert_eq!(parse_threshold("confidence", "0.5").unwrap(), 0.5);
        assert_eq!(parse_threshold("iou", " 0.3 ").unwrap(), 0.3);
    }

    #[test]
    fn out_of_range_thresholds_are_not_rejected() {
        assert_eq!(parse_threshold("confidence", "1.5").unwrap(), 1.5);
        assert_eq!(parse_threshold("iou", "-0.2").unwrap(), -0.2);
    }

    #[test]
    fn non_numeric_thresholds_are_rejected() {
        assert!(matches!(
            parse_threshold("confidence", "high"),
            Err(ApiError::InvalidNumberField {
                field: "confidence",
                ..
            })
        ));
    }
}
