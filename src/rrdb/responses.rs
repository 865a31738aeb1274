use std::time::Duration;

use super::base::{Blob, KeyValue};

// -----------------------------------------------------------------------------
// ----- Constants -------------------------------------------------------------

/// Storage status for a successful operation.
pub const STATUS_OK: i32 = 0;

/// Storage status the server reports when a key does not exist.
pub const STATUS_NOT_FOUND: i32 = 1;

/// Scan context id the server returns once a scanner has no more data.
pub const SCAN_CONTEXT_ID_COMPLETED: i64 = -1;

/// `ttl_seconds` value for a record that never expires.
pub const TTL_NONE: i32 = -1;

// -----------------------------------------------------------------------------
// ----- ReadResponse ----------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadResponse {
    pub error: i32,
    pub value: Blob,
    pub app_id: i32,
    pub partition_index: i32,
    pub server: String,
}

impl ReadResponse {
    /// The key was absent. This is a successful read, not a failure.
    pub fn is_not_found(&self) -> bool {
        self.error == STATUS_NOT_FOUND
    }

    /// The stored value, or `None` when the key was absent.
    pub fn found_value(&self) -> Option<&Blob> {
        (self.error == STATUS_OK).then_some(&self.value)
    }
}

// -----------------------------------------------------------------------------
// ----- UpdateResponse --------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateResponse {
    pub error: i32,
    pub app_id: i32,
    pub partition_index: i32,
    pub decree: i64,
    pub seq_no: i64,
    pub server: String,
}

// -----------------------------------------------------------------------------
// ----- Multi responses -------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiGetResponse {
    pub error: i32,
    pub kvs: Vec<KeyValue>,
    pub app_id: i32,
    pub partition_index: i32,
    pub server: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiRemoveResponse {
    pub error: i32,
    pub count: i64,
    pub app_id: i32,
    pub partition_index: i32,
    pub decree: i64,
    pub server: String,
}

// -----------------------------------------------------------------------------
// ----- TtlResponse -----------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TtlResponse {
    pub error: i32,
    pub ttl_seconds: i32,
    pub app_id: i32,
    pub partition_index: i32,
    pub server: String,
}

impl TtlResponse {
    /// Remaining lifetime. `None` when the record has no expiry or is absent.
    pub fn ttl(&self) -> Option<Duration> {
        // Negative covers TTL_NONE.
        if self.error != STATUS_OK || self.ttl_seconds < 0 {
            return None;
        }
        Some(Duration::from_secs(self.ttl_seconds as u64))
    }
}

// -----------------------------------------------------------------------------
// ----- ScanResponse ----------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResponse {
    pub error: i32,
    pub kvs: Vec<KeyValue>,
    pub context_id: i64,
    pub app_id: i32,
    pub partition_index: i32,
    pub server: String,
}

impl ScanResponse {
    pub fn is_exhausted(&self) -> bool {
        self.context_id == SCAN_CONTEXT_ID_COMPLETED
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
