//! Typed request, response and result values of the replica read/write
//! service. Encoding them is the transport's job.

pub mod base;
pub mod operation;
pub mod requests;
pub mod responses;

pub use base::{Blob, Gpid, KeyValue};
pub use operation::{OperationTag, RrdbArgs, RrdbResult, ServerFault};
pub use requests::{
    FilterType, GetScannerRequest, KeyFilter, MultiGetRequest, MultiPutRequest,
    MultiRemoveRequest, ScanRequest, UpdateRequest,
};
pub use responses::{
    MultiGetResponse, MultiRemoveResponse, ReadResponse, ScanResponse, TtlResponse,
    UpdateResponse,
};
