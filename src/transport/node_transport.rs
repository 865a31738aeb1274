use async_trait::async_trait;
use thiserror::Error;

use super::context::CallContext;
use crate::rrdb::{Gpid, OperationTag, RrdbArgs, RrdbResult};

// -----------------------------------------------------------------------------
// ----- TransportError --------------------------------------------------------

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("call timed out")]
    Timeout,

    #[error("call canceled")]
    Canceled,

    #[error("session closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}

// -----------------------------------------------------------------------------
// ----- NodeTransport ---------------------------------------------------------

/// Generic call primitive of one network session.
///
/// Implementations multiplex any number of concurrent calls over a single
/// connection and must honor the deadline and cancellation in `ctx`
/// (see [`CallContext::run`]).
#[async_trait]
pub trait NodeTransport: Send + Sync + 'static {
    async fn call(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        args: RrdbArgs,
        tag: OperationTag,
    ) -> Result<RrdbResult, TransportError>;

    /// Shuts the session down. Resolves once the close sequence finished.
    async fn close(&self) -> Result<(), TransportError>;
}

// -----------------------------------------------------------------------------
// ----- Connector -------------------------------------------------------------

/// Builds the transport for an address.
///
/// Called while the pool holds its write lock: it must return immediately and
/// leave connection establishment to the transport itself.
pub trait Connector: Send + Sync + 'static {
    type Transport: NodeTransport;

    fn connect(&self, addr: &str) -> Self::Transport;
}

impl<F, T> Connector for F
where
    F: Fn(&str) -> T + Send + Sync + 'static,
    T: NodeTransport,
{
    type Transport = T;

    fn connect(&self, addr: &str) -> T {
        self(addr)
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
