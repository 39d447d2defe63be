mod app;

use std::{
    fs::{self, OpenOptions},
    sync::Arc,
};

use anyhow::Result;
use gamedex_core::{
    config::{self, AppConfig},
    CatalogClient, QueryController, RawgClient,
};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;

    let client = RawgClient::new(&config)?;
    let has_api_key = client.has_api_key();
    if !has_api_key {
        warn!("No catalog API key configured; searches will fail until one is set");
    }
    info!(base_url = %config.base_url, policy = ?config.stale_policy, "Starting gamedex");

    let client: Arc<dyn CatalogClient> = Arc::new(client);
    let controller = QueryController::new(client, config.stale_policy);
    let mut app = app::GamedexApp::new(controller, has_api_key);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("gamedex.log");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal is in raw mode while the UI runs, so logs only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
