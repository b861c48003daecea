use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use cinegate::{
    Ctx, app,
    config::AppConfig,
    imdb::{ImdbClient, ImdbProvider},
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let client = ImdbClient::new(&config.rapidapi_host, &config.rapidapi_key);
    let ctx = Ctx::new(ImdbProvider::new(client));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, upstream = %config.rapidapi_host, "cinegate listening");

    axum::serve(listener, app(ctx))
        .await
        .context("Server error")?;

    Ok(())
}
