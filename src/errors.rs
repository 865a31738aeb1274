use std::fmt;

use thiserror::Error;

use crate::rrdb::{Gpid, OperationTag, ServerFault};
use crate::transport::TransportError;

// -----------------------------------------------------------------------------
// ----- SessionError ----------------------------------------------------------

/// Failure of one typed call on a replica session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The call never produced a result: connection, timeout or cancellation.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{op} on partition {gpid} failed on server: {fault}")]
    Application {
        op: OperationTag,
        gpid: Gpid,
        fault: ServerFault,
    },

    /// The transport decoded a result belonging to another operation.
    #[error("issued {expected} but decoded a result for {actual}")]
    UnexpectedResult {
        expected: OperationTag,
        actual: OperationTag,
    },
}

impl SessionError {
    pub fn is_transport(&self) -> bool {
        matches!(self, SessionError::Transport(_))
    }
}

// -----------------------------------------------------------------------------
// ----- PoolError -------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("replica manager is closed")]
    Closed,

    #[error("{} replica session(s) failed to close: {}", failures.len(), CloseFailures(failures))]
    CloseFailed { failures: Vec<CloseFailure> },
}

#[derive(Debug, Error)]
#[error("replica({addr}): {source}")]
pub struct CloseFailure {
    pub addr: String,
    pub source: TransportError,
}

// -----------------------------------------------------------------------------
// ----- Internal: Helpers -----------------------------------------------------

struct CloseFailures<'a>(&'a [CloseFailure]);

impl fmt::Display for CloseFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
