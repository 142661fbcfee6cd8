use common::TelemetryGuard;
use gateway::{
    config::get_configuration, logging::setup_logging, routes::router, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration()?;

    let _telemetry = config
        .otel_endpoint
        .as_ref()
        .map(|endpoint| TelemetryGuard::init("gateway", endpoint))
        .transpose()?;

    setup_logging(&config);

    tracing::info!(
        host = %config.host,
        port = config.port,
        model_id = %config.inference.model_id,
        "Loaded configuration"
    );

    let state = AppState::build(&config)?;
    let app = router(state, config.max_upload_bytes);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
