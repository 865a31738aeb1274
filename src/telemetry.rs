use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogLevel;

/// Installs a fmt subscriber filtered at `level`, unless `RUST_LOG` says
/// otherwise. A subscriber installed earlier wins.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.as_str()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
