//! Telemetry setup

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::DEFAULT_LOG_FILTER;

/// Installs the global JSON subscriber. Keep the returned guard alive for the
/// lifetime of the process or buffered lines are lost on exit.
pub fn init_telemetry() -> WorkerGuard {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(writer))
        .init();
    guard
}
