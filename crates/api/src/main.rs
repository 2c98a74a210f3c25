use std::sync::Arc;

use anyhow::Context;

use stockbook_api::app::{build_app, services::AppServices};
use stockbook_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockbook_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let addr = config.socket_addr().context("invalid listen address")?;

    let services = AppServices::open_json_file(&config.data_file)
        .with_context(|| format!("failed to load {}", config.data_file.display()))?;
    services.spawn_event_log();

    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        data_file = %config.data_file.display(),
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
