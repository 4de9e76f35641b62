use anyhow::Context;
use dotenvy::dotenv;
use streamvault::logging::init_tracing;
use streamvault::metrics::{init_metrics, metrics_app};
use streamvault::router::init_router;
use streamvault::state::init_app_state;
use streamvault_config::ServerConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env();
    let state = init_app_state(&server_config).await?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_app(handle));
    }

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
