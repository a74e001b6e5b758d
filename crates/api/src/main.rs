use anyhow::Context;

use standpos_api::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    standpos_observability::init();

    let config = AppConfig::from_env()?;
    let app = standpos_api::app::build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
