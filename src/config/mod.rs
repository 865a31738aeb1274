#[allow(clippy::module_inception)]
pub mod config;
pub mod types;

pub use config::{ConfigError, SessionConfig};
pub use types::LogLevel;
