//! Logging setup
//!
//! Env-filtered console output plus a non-blocking daily log file under
//! `logs/`. The returned guard must stay alive for the lifetime of the
//! process or buffered log lines are dropped on exit.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Directory for log files
const LOG_DIR: &str = "logs";

/// Initialize the tracing subscriber
///
/// Respects `RUST_LOG`; defaults to `info` when unset.
pub fn init_logging() -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(LOG_DIR, "relay.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(guard)
}
