use crate::config::Config;
use crate::inference::InferenceClient;
use annotate::Annotator;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram};
use std::path::Path;
use std::sync::Arc;

pub struct Metrics {
    pub request_duration: Histogram<f64>,
    pub requests: Counter<u64>,
    pub detections: Counter<u64>,
}

impl Metrics {
    pub fn init(meter_name: &'static str) -> Self {
        let meter = global::meter(meter_name);
        let latency_buckets = [
            0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 5.0, 10.0,
        ];
        let request_duration: Histogram<f64> = meter
            .f64_histogram("gateway_request_duration_seconds")
            .with_description("Time to serve a single detection request (inference + post-processing)")
            .with_unit("s")
            .with_boundaries(latency_buckets.to_vec())
            .build();
        let requests: Counter<u64> = meter
            .u64_counter("gateway_requests_total")
            .with_description("Total detection requests served")
            .build();
        let detections: Counter<u64> = meter
            .u64_counter("gateway_detections_total")
            .with_description("Total detections surviving post-processing")
            .build();

        Self {
            request_duration,
            requests,
            detections,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub inference: Arc<InferenceClient>,
    pub annotator: Arc<Annotator>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn build(config: &Config) -> anyhow::Result<Self> {
        let inference = InferenceClient::new(&config.inference)?;
        let annotator = Annotator::load(config.font_path.as_deref().map(Path::new))?;

        Ok(Self {
            inference: Arc::new(inference),
            annotator: Arc::new(annotator),
            metrics: Arc::new(Metrics::init("gateway")),
        })
    }
}
