use serde::Deserialize;

pub use common::{Environment, LogLevel};

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSettings {
    /// Base URL of the hosted detection API.
    pub api_url: String,
    pub api_key: String,
    pub model_id: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// TTF file for box labels; when unset, common system locations are searched.
    pub font_path: Option<String>,
    pub otel_endpoint: Option<String>,
    pub inference: InferenceSettings,
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    let config = config::Config::builder()
        .set_default("log_level", "info")?
        .set_default("environment", "development")?
        .set_default("host", "0.0.0.0")?
        .set_default("port", 5001)?
        .set_default("max_upload_bytes", 10 * 1024 * 1024)?
        .set_default("inference.api_url", "https://detect.roboflow.com")?
        .set_default("inference.timeout_secs", 30)?
        .set_default("inference.max_retries", 3)?
        .set_default("inference.retry_base_delay_ms", 200)?
        .add_source(
            config::Environment::with_prefix("GATEWAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = config.try_deserialize::<Config>()?;

    Ok(config)
}
