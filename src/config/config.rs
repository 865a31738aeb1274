use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tokio::fs;

use super::types::LogLevel;
use crate::transport::CallContext;

// -----------------------------------------------------------------------------
// ----- SessionConfig ---------------------------------------------------------

/// Tunables for the replica session layer, read from the `[session]` table.
///
/// ```toml
/// [session]
/// call_timeout = "3s"
/// close_timeout = "5s"
/// log_level = "debug"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Deadline given to contexts built by [`SessionConfig::call_context`].
    pub call_timeout: Option<Duration>,
    /// Upper bound on each session's close during pool shutdown.
    pub close_timeout: Option<Duration>,
    pub log_level: LogLevel,
}

// -----------------------------------------------------------------------------
// ----- SessionConfig: Static -------------------------------------------------

impl SessionConfig {
    pub async fn from_file_async(path: &Path) -> Result<SessionConfig, ConfigError> {
        let raw = fs::read_to_string(path).await.map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<SessionConfig, ConfigError> {
        let doc: SessionFile = toml::from_str(raw).map_err(|e| ConfigError::Toml { source: e })?;
        let section = doc.session;

        Ok(SessionConfig {
            call_timeout: parse_duration("call_timeout", section.call_timeout.as_deref())?,
            close_timeout: parse_duration("close_timeout", section.close_timeout.as_deref())?,
            log_level: section.log_level,
        })
    }
}

// -----------------------------------------------------------------------------
// ----- SessionConfig: Public -------------------------------------------------

impl SessionConfig {
    /// Fresh context carrying the configured call deadline, if any.
    pub fn call_context(&self) -> CallContext {
        match self.call_timeout {
            Some(timeout) => CallContext::with_timeout(timeout),
            None => CallContext::new(),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Internal: On-disk format ----------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
struct SessionFile {
    #[serde(default)]
    session: SessionSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionSection {
    call_timeout: Option<String>,
    close_timeout: Option<String>,
    #[serde(default)]
    log_level: LogLevel,
}

fn parse_duration(field: &'static str, raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    raw.map(|value| {
        humantime::parse_duration(value).map_err(|e| ConfigError::Duration { field, source: e })
    })
    .transpose()
}

// -----------------------------------------------------------------------------
// ----- Errors ----------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("toml parse error: {source}")]
    Toml { source: toml::de::Error },

    #[error("invalid duration for '{field}': {source}")]
    Duration {
        field: &'static str,
        source: humantime::DurationError,
    },
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
