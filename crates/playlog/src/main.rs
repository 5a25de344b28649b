//! Main entry point for Playlog.

use anyhow::Context;
use playlog::PlaylogApp;
use playlog_common::init_logging;
use playlog_config::ConfigLoader;
use std::io;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let config_path = ConfigLoader::locate();
    let config = ConfigLoader::load_from(config_path.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Starting Playlog");
    // Config loading precedes the subscriber.
    match &config_path {
        Some(path) => info!(path = %path.display(), "Loaded configuration file"),
        None => info!("No configuration file found, using defaults"),
    }

    let app = PlaylogApp::new(config);
    let mut out = io::stdout().lock();

    if let Err(e) = app.run(&mut out) {
        if e.is_data_error() {
            error!("Streaming history could not be summarized: {}", e);
        } else {
            error!("Report generation failed: {}", e);
        }
        return Err(e).context("Failed to generate report");
    }

    Ok(())
}
