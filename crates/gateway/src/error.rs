use crate::inference::InferenceError;
use annotate::AnnotateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing `image` part in multipart form")]
    MissingImage,
    #[error("invalid multipart request: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    #[error("could not parse `{field}` value `{value}` as a number")]
    InvalidNumberField { field: &'static str, value: String },
    #[error("inference call failed: {0}")]
    Inference(#[from] InferenceError),
    #[error("malformed detection data: {0}")]
    Data(#[from] pipeline::DataError),
    #[error("image processing failed: {0}")]
    Annotate(#[from] AnnotateError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImage
            | ApiError::Multipart(_)
            | ApiError::InvalidNumberField { .. } => StatusCode::BAD_REQUEST,
            ApiError::Annotate(AnnotateError::Decode(_)) => StatusCode::BAD_REQUEST,
            ApiError::Data(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) => StatusCode::BAD_GATEWAY,
            ApiError::Annotate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(error = %self, status = %status, "Request failed");
        (status, self.to_string()).into_response()
    }
}
