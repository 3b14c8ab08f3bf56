use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(config);
    let registry = tracing_subscriber::registry().with(env_filter);
    let log_file = open_log_file(config)?;

    match (config.format.as_str(), log_file) {
        ("json", Some(file)) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(Mutex::new(file)),
            )
            .try_init()?,
        ("json", None) => registry
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init()?,
        (_, Some(file)) => registry
            .with(
                fmt::layer()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .try_init()?,
        (_, None) => registry
            .with(fmt::layer().with_span_events(FmtSpan::CLOSE))
            .try_init()?,
    }

    tracing::info!(
        level = %config.level,
        format = %config.format,
        "Logging initialized"
    );
    Ok(())
}

pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(config: &LoggingConfig) -> Result<Option<File>> {
    let Some(path) = &config.file_path else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path))?;
    Ok(Some(file))
}
