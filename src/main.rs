use anyhow::Context;

use bookshelf_api::{app, auth::JwtKeys, config::AppConfig, logging, store, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, ACCESS_TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();

    logging::init();

    let config = AppConfig::from_env();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting bookshelf API in {:?} mode", config.environment);

    let store = store::open(&config.store)
        .await
        .context("failed to open document store")?;
    let keys = JwtKeys::from_config(&config.security).context("failed to load signing secret")?;

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("bookshelf running on http://{}", bind_addr);

    let state = AppState::new(store, keys, config);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
