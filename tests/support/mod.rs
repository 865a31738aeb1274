#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::{
    future::pending,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use replica_session::rrdb::{Gpid, OperationTag, RrdbArgs, RrdbResult};
use replica_session::{
    CallContext, Connector, NodeTransport, ReplicaSession, SessionError, TransportError,
};

pub const ADDR_1: &str = "10.0.0.1:34801";
pub const ADDR_2: &str = "10.0.0.2:34801";

// -----------------------------------------------------------------------------
// ----- MockTransport ---------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub gpid: Gpid,
    pub args: RrdbArgs,
    pub tag: OperationTag,
}

pub enum Reply {
    Result(RrdbResult),
    Transport(fn() -> TransportError),
    Hang,
}

pub struct MockTransport {
    reply: Mutex<Reply>,
    calls: Mutex<Vec<RecordedCall>>,
    close_delay: Duration,
    close_error: Option<fn() -> TransportError>,
    closed: AtomicBool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            reply: Mutex::new(Reply::Hang),
            calls: Mutex::new(Vec::new()),
            close_delay: Duration::ZERO,
            close_error: None,
            closed: AtomicBool::new(false),
        }
    }

    pub fn replying(self, result: RrdbResult) -> Self {
        *self.reply.lock() = Reply::Result(result);
        self
    }

    pub fn failing_with(self, err: fn() -> TransportError) -> Self {
        *self.reply.lock() = Reply::Transport(err);
        self
    }

    pub fn close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    pub fn close_failing_with(mut self, err: fn() -> TransportError) -> Self {
        self.close_error = Some(err);
        self
    }

    pub fn set_reply(&self, result: RrdbResult) {
        *self.reply.lock() = Reply::Result(result);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NodeTransport for MockTransport {
    async fn call(
        &self,
        ctx: &CallContext,
        gpid: &Gpid,
        args: RrdbArgs,
        tag: OperationTag,
    ) -> Result<RrdbResult, TransportError> {
        self.calls.lock().push(RecordedCall {
            gpid: *gpid,
            args,
            tag,
        });

        let outcome = match &*self.reply.lock() {
            Reply::Result(result) => Some(Ok(result.clone())),
            Reply::Transport(err) => Some(Err(err())),
            Reply::Hang => None,
        };

        ctx.run(async move {
            match outcome {
                Some(res) => res,
                None => pending().await,
            }
        })
        .await
    }

    async fn close(&self) -> Result<(), TransportError> {
        if !self.close_delay.is_zero() {
            tokio::time::sleep(self.close_delay).await;
        }
        self.closed.store(true, Ordering::SeqCst);

        match self.close_error {
            Some(err) => Err(err()),
            None => Ok(()),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- CountingConnector -----------------------------------------------------

#[derive(Clone, Default)]
pub struct CountingConnector {
    pub created: Arc<AtomicUsize>,
    pub close_delay: Duration,
    pub failing_addrs: Vec<&'static str>,
}

impl CountingConnector {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl Connector for CountingConnector {
    type Transport = MockTransport;

    fn connect(&self, addr: &str) -> MockTransport {
        self.created.fetch_add(1, Ordering::SeqCst);

        let transport = MockTransport::new().close_delay(self.close_delay);
        if self.failing_addrs.iter().any(|failing| *failing == addr) {
            transport.close_failing_with(|| TransportError::Other("broken pipe".into()))
        } else {
            transport
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Helpers ---------------------------------------------------------------

pub fn session(transport: MockTransport) -> ReplicaSession<MockTransport> {
    ReplicaSession::new(ADDR_1, transport)
}

/// Issues every typed operation once, discarding the success payloads.
pub async fn call_every_operation(
    session: &ReplicaSession<MockTransport>,
    ctx: &CallContext,
    gpid: &Gpid,
) -> Vec<(OperationTag, Result<(), SessionError>)> {
    use replica_session::rrdb::{
        Blob, GetScannerRequest, MultiGetRequest, MultiPutRequest, MultiRemoveRequest,
        ScanRequest,
    };

    let key = Blob::from("k");
    vec![
        (OperationTag::Get, session.get(ctx, gpid, key.clone()).await.map(drop)),
        (
            OperationTag::Put,
            session.put(ctx, gpid, key.clone(), Blob::from("v")).await.map(drop),
        ),
        (OperationTag::Remove, session.del(ctx, gpid, key.clone()).await.map(drop)),
        (
            OperationTag::MultiGet,
            session.multi_get(ctx, gpid, MultiGetRequest::default()).await.map(drop),
        ),
        (
            OperationTag::MultiPut,
            session.multi_set(ctx, gpid, MultiPutRequest::default()).await.map(drop),
        ),
        (
            OperationTag::MultiRemove,
            session
                .multi_delete(ctx, gpid, MultiRemoveRequest::default())
                .await
                .map(drop),
        ),
        (OperationTag::Ttl, session.ttl(ctx, gpid, key.clone()).await.map(drop)),
        (
            OperationTag::GetScanner,
            session
                .get_scanner(ctx, gpid, GetScannerRequest::default())
                .await
                .map(drop),
        ),
        (
            OperationTag::Scan,
            session.scan(ctx, gpid, ScanRequest { context_id: 9 }).await.map(drop),
        ),
        (OperationTag::ClearScanner, session.clear_scanner(ctx, gpid, 9).await),
    ]
}
