mod app;

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    sync::Mutex,
};

use tracing_subscriber::{prelude::*, EnvFilter};
use vault_core::{
    config::{self, AppConfig},
    Storefront,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    tracing::info!(
        default_game = %config.default_game,
        export_dir = %config.export_dir.display(),
        "Configuration loaded"
    );

    let storefront = Storefront::from_config(&config).context("failed to load storefront data")?;

    let mut app = app::VaultApp::new(storefront, config.export_dir.clone());
    app.run().await
}

// The terminal owns stdout, so the log file is the only sink.
fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("vault.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::from_default_env();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
