use std::fmt;

use super::base::{Blob, Gpid};
use super::requests::{
    GetScannerRequest, MultiGetRequest, MultiPutRequest, MultiRemoveRequest, ScanRequest,
    UpdateRequest,
};
use super::responses::{
    MultiGetResponse, MultiRemoveResponse, ReadResponse, ScanResponse, TtlResponse,
    UpdateResponse,
};
use crate::errors::SessionError;

// -----------------------------------------------------------------------------
// ----- OperationTag ----------------------------------------------------------

/// Wire-level operation names understood by the replica server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationTag {
    Get,
    Put,
    Remove,
    MultiGet,
    MultiPut,
    MultiRemove,
    Ttl,
    GetScanner,
    Scan,
    ClearScanner,
}

impl OperationTag {
    pub const ALL: [OperationTag; 10] = [
        OperationTag::Get,
        OperationTag::Put,
        OperationTag::Remove,
        OperationTag::MultiGet,
        OperationTag::MultiPut,
        OperationTag::MultiRemove,
        OperationTag::Ttl,
        OperationTag::GetScanner,
        OperationTag::Scan,
        OperationTag::ClearScanner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationTag::Get => "RPC_RRDB_RRDB_GET",
            OperationTag::Put => "RPC_RRDB_RRDB_PUT",
            OperationTag::Remove => "RPC_RRDB_RRDB_REMOVE",
            OperationTag::MultiGet => "RPC_RRDB_RRDB_MULTI_GET",
            OperationTag::MultiPut => "RPC_RRDB_RRDB_MULTI_PUT",
            OperationTag::MultiRemove => "RPC_RRDB_RRDB_MULTI_REMOVE",
            OperationTag::Ttl => "RPC_RRDB_RRDB_TTL",
            OperationTag::GetScanner => "RPC_RRDB_RRDB_GET_SCANNER",
            OperationTag::Scan => "RPC_RRDB_RRDB_SCAN",
            OperationTag::ClearScanner => "RPC_RRDB_RRDB_CLEAR_SCANNER",
        }
    }
}

impl fmt::Display for OperationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// ----- RrdbArgs --------------------------------------------------------------

/// Request envelope handed to the transport, one variant per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RrdbArgs {
    Get { key: Blob },
    Put { update: UpdateRequest },
    Remove { key: Blob },
    MultiGet { request: MultiGetRequest },
    MultiPut { request: MultiPutRequest },
    MultiRemove { request: MultiRemoveRequest },
    Ttl { key: Blob },
    GetScanner { request: GetScannerRequest },
    Scan { request: ScanRequest },
    ClearScanner { context_id: i64 },
}

impl RrdbArgs {
    pub fn tag(&self) -> OperationTag {
        match self {
            RrdbArgs::Get { .. } => OperationTag::Get,
            RrdbArgs::Put { .. } => OperationTag::Put,
            RrdbArgs::Remove { .. } => OperationTag::Remove,
            RrdbArgs::MultiGet { .. } => OperationTag::MultiGet,
            RrdbArgs::MultiPut { .. } => OperationTag::MultiPut,
            RrdbArgs::MultiRemove { .. } => OperationTag::MultiRemove,
            RrdbArgs::Ttl { .. } => OperationTag::Ttl,
            RrdbArgs::GetScanner { .. } => OperationTag::GetScanner,
            RrdbArgs::Scan { .. } => OperationTag::Scan,
            RrdbArgs::ClearScanner { .. } => OperationTag::ClearScanner,
        }
    }
}

// -----------------------------------------------------------------------------
// ----- ServerFault -----------------------------------------------------------

/// Failure reported by the replica server in place of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerFault {
    pub code: String,
    pub message: String,
}

impl ServerFault {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ServerFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            f.write_str(&self.code)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

// -----------------------------------------------------------------------------
// ----- RrdbResult ------------------------------------------------------------

/// Decoded result of a generic call.
///
/// Exactly one success variant belongs to each [`OperationTag`]; `Failed`
/// can come back for any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RrdbResult {
    Get(ReadResponse),
    Put(UpdateResponse),
    Remove(UpdateResponse),
    MultiGet(MultiGetResponse),
    MultiPut(UpdateResponse),
    MultiRemove(MultiRemoveResponse),
    Ttl(TtlResponse),
    GetScanner(ScanResponse),
    Scan(ScanResponse),
    ClearScanner,
    Failed(ServerFault),
}

impl RrdbResult {
    /// Operation this variant answers, `None` for `Failed`.
    pub fn tag(&self) -> Option<OperationTag> {
        self.answered().ok()
    }

    /// Turns a result that did not match `expected` into the matching error.
    pub(crate) fn into_error(self, gpid: Gpid, expected: OperationTag) -> SessionError {
        match self.answered() {
            Ok(actual) => SessionError::UnexpectedResult { expected, actual },
            Err(fault) => SessionError::Application {
                op: expected,
                gpid,
                fault: fault.clone(),
            },
        }
    }

    fn answered(&self) -> Result<OperationTag, &ServerFault> {
        match self {
            RrdbResult::Get(_) => Ok(OperationTag::Get),
            RrdbResult::Put(_) => Ok(OperationTag::Put),
            RrdbResult::Remove(_) => Ok(OperationTag::Remove),
            RrdbResult::MultiGet(_) => Ok(OperationTag::MultiGet),
            RrdbResult::MultiPut(_) => Ok(OperationTag::MultiPut),
            RrdbResult::MultiRemove(_) => Ok(OperationTag::MultiRemove),
            RrdbResult::Ttl(_) => Ok(OperationTag::Ttl),
            RrdbResult::GetScanner(_) => Ok(OperationTag::GetScanner),
            RrdbResult::Scan(_) => Ok(OperationTag::Scan),
            RrdbResult::ClearScanner => Ok(OperationTag::ClearScanner),
            RrdbResult::Failed(fault) => Err(fault),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
