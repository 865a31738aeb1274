use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::errors::SessionError;
use crate::rrdb::{
    Blob, GetScannerRequest, Gpid, MultiGetRequest, MultiGetResponse, MultiPutRequest,
    MultiRemoveRequest, MultiRemoveResponse, OperationTag, ReadResponse, RrdbArgs, RrdbResult,
    ScanRequest, ScanResponse, TtlResponse, UpdateRequest, UpdateResponse,
};
use crate::transport::{CallContext, NodeTransport, TransportError};

// -----------------------------------------------------------------------------
// ----- ReplicaSession --------------------------------------------------------

/// Typed operations against one replica server.
///
/// Every method issues exactly one call through the shared transport, so a
/// session can be used from any number of tasks at once.
pub struct ReplicaSession<T> {
    addr: String,
    transport: Arc<T>,
}

// -----------------------------------------------------------------------------
// ----- ReplicaSession: Static ------------------------------------------------

impl<T: NodeTransport> ReplicaSession<T> {
    pub fn new(addr: impl Into<String>, transport: T) -> Self {
        Self {
            addr: addr.into(),
            transport: Arc::new(transport),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- ReplicaSession: Public ------------------------------------------------

impl<T: NodeTransport> ReplicaSession<T> {
    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub async fn get(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        key: Blob,
    ) -> Result<ReadResponse, SessionError> {
        match self.call(ctx, gpid, RrdbArgs::Get { key }).await? {
            RrdbResult::Get(resp) => Ok(resp),
            other => Err(other.into_error(*gpid, OperationTag::Get)),
        }
    }

    pub async fn put(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        key: Blob,
        value: Blob,
    ) -> Result<UpdateResponse, SessionError> {
        let update = UpdateRequest {
            key,
            value,
            expire_ts_seconds: 0,
        };

        match self.call(ctx, gpid, RrdbArgs::Put { update }).await? {
            RrdbResult::Put(resp) => Ok(resp),
            other => Err(other.into_error(*gpid, OperationTag::Put)),
        }
    }

    pub async fn del(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        key: Blob,
    ) -> Result<UpdateResponse, SessionError> {
        match self.call(ctx, gpid, RrdbArgs::Remove { key }).await? {
            RrdbResult::Remove(resp) => Ok(resp),
            other => Err(other.into_error(*gpid, OperationTag::Remove)),
        }
    }

    pub async fn multi_get(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        request: MultiGetRequest,
    ) -> Result<MultiGetResponse, SessionError> {
        match self.call(ctx, gpid, RrdbArgs::MultiGet { request }).await? {
            RrdbResult::MultiGet(resp) => Ok(resp),
            other => Err(other.into_error(*gpid, OperationTag::MultiGet)),
        }
    }

    pub async fn multi_set(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        request: MultiPutRequest,
    ) -> Result<UpdateResponse, SessionError> {
        match self.call(ctx, gpid, RrdbArgs::MultiPut { request }).await? {
            RrdbResult::MultiPut(resp) => Ok(resp),
            other => Err(other.into_error(*gpid, OperationTag::MultiPut)),
        }
    }

    pub async fn multi_delete(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        request: MultiRemoveRequest,
    ) -> Result<MultiRemoveResponse, SessionError> {
        match self.call(ctx, gpid, RrdbArgs::MultiRemove { request }).await? {
            RrdbResult::MultiRemove(resp) => Ok(resp),
            other => Err(other.into_error(*gpid, OperationTag::MultiRemove)),
        }
    }

    pub async fn ttl(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        key: Blob,
    ) -> Result<TtlResponse, SessionError> {
        match self.call(ctx, gpid, RrdbArgs::Ttl { key }).await? {
            RrdbResult::Ttl(resp) => Ok(resp),
            other => Err(other.into_error(*gpid, OperationTag::Ttl)),
        }
    }

    /// Opens a scanner and returns its first batch.
    pub async fn get_scanner(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        request: GetScannerRequest,
    ) -> Result<ScanResponse, SessionError> {
        match self.call(ctx, gpid, RrdbArgs::GetScanner { request }).await? {
            RrdbResult::GetScanner(resp) => Ok(resp),
            other => Err(other.into_error(*gpid, OperationTag::GetScanner)),
        }
    }

    pub async fn scan(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        request: ScanRequest,
    ) -> Result<ScanResponse, SessionError> {
        match self.call(ctx, gpid, RrdbArgs::Scan { request }).await? {
            RrdbResult::Scan(resp) => Ok(resp),
            other => Err(other.into_error(*gpid, OperationTag::Scan)),
        }
    }

    pub async fn clear_scanner(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        context_id: i64,
    ) -> Result<(), SessionError> {
        match self.call(ctx, gpid, RrdbArgs::ClearScanner { context_id }).await? {
            RrdbResult::ClearScanner => Ok(()),
            other => Err(other.into_error(*gpid, OperationTag::ClearScanner)),
        }
    }

    pub async fn close(&self) -> Result<(), TransportError> {
        self.transport.close().await
    }
}

// -----------------------------------------------------------------------------
// ----- ReplicaSession: Private -----------------------------------------------

impl<T: NodeTransport> ReplicaSession<T> {
    async fn call(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        args: RrdbArgs,
    ) -> Result<RrdbResult, SessionError> {
        let tag = args.tag();
        debug!("{self}: {tag} on partition {gpid}");

        let result = self.transport.call(ctx, gpid, args, tag).await?;
        Ok(result)
    }
}

// -----------------------------------------------------------------------------
// ----- ReplicaSession: Formatting --------------------------------------------

impl<T> fmt::Display for ReplicaSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "replica({})", self.addr)
    }
}

impl<T> fmt::Debug for ReplicaSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplicaSession")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
