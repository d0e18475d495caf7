//! Tracing setup: stdout plus a daily-rolling log file.

use std::fs;

use anyhow::Context;
use shopfeed_core::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: a stdout layer plus a non-ANSI layer
/// writing through a non-blocking daily-rolling appender in the configured
/// log directory.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies. The
/// returned guard flushes the file writer on drop, so hold it for the life
/// of the process.
///
/// # Errors
///
/// Fails when the log directory cannot be created or a global subscriber
/// is already installed.
pub(crate) fn init(config: &AppConfig) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(&config.log_dir).with_context(|| {
        format!(
            "failed to create log directory {}",
            config.log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "shopfeed.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
