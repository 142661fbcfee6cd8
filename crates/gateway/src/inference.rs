use crate::config::InferenceSettings;
use pipeline::Detection;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("request to inference provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("inference provider returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("could not parse inference response: {0}")]
    Payload(#[source] reqwest::Error),
}

/// One raw prediction from the hosted model. Extra provider fields
/// (detection ids, class ids, image metadata) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub class: String,
    pub confidence: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

impl From<Prediction> for Detection {
    fn from(p: Prediction) -> Self {
        Detection {
            class: p.class,
            confidence: p.confidence,
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
        }
    }
}

/// Client for the hosted object-detection API: uploads the image as multipart
/// form data to `{api_url}/{model_id}?api_key=...` and returns the raw
/// prediction set. Transient failures are retried with exponential backoff.
pub struct InferenceClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    max_retries: u32,
    retry_base_delay_ms: u64,
}

impl InferenceClient {
    pub fn new(settings: &InferenceSettings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let endpoint = format!(
            "{}/{}",
            settings.api_url.trim_end_matches('/'),
            settings.model_id
        );

        Ok(Self {
            http,
            endpoint,
            api_key: settings.api_key.clone(),
            max_retries: settings.max_retries.max(1),
            retry_base_delay_ms: settings.retry_base_delay_ms,
        })
    }

    #[tracing::instrument(skip(self, image), fields(image_bytes = image.len()))]
    pub async fn detect(&self, image: &[u8]) -> Result<Vec<Detection>, InferenceError> {
        let response = common::retry_with_backoff_async(
            || self.send_once(image),
            self.max_retries,
            self.retry_base_delay_ms,
            "Inference call",
        )
        .await?;

        tracing::debug!(
            predictions = response.predictions.len(),
            "Inference response received"
        );

        Ok(response
            .predictions
            .into_iter()
            .map(Detection::from)
            .collect())
    }

    async fn send_once(&self, image: &[u8]) -> Result<InferenceResponse, InferenceError> {
        let part = reqwest::multipart::Part::bytes(image.to_vec()).file_name("upload.png");
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(InferenceError::Status(response.status()));
        }

        response
            .json::<InferenceResponse>()
            .await
            .map_err(InferenceError::Payload)
    }
}
