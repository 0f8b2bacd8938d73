use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::Config;

const DEFAULT_FILTER: &str = "info";

/// Send tracing output to the log file in the data directory. Stdout and the
/// terminal belong to the console menu and the dashboard.
pub(crate) fn init(config: &Config) -> Result<()> {
    let path = config.log_path();
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_log)
        .try_init()
        .context("Failed to initialise logging")?;

    tracing::debug!(data_dir = %config.data_dir.display(), "logging initialised");
    Ok(())
}
