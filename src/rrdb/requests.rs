use super::base::{Blob, KeyValue};

// -----------------------------------------------------------------------------
// ----- FilterType ------------------------------------------------------------

/// How a key filter pattern is matched on the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterType {
    #[default]
    NoFilter,
    MatchAnywhere,
    MatchPrefix,
    MatchPostfix,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFilter {
    pub kind: FilterType,
    pub pattern: Blob,
}

// -----------------------------------------------------------------------------
// ----- Point requests --------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    pub key: Blob,
    pub value: Blob,
    /// Absolute expiry, 0 means the record never expires.
    pub expire_ts_seconds: i32,
}

// -----------------------------------------------------------------------------
// ----- Multi requests --------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiGetRequest {
    pub hash_key: Blob,
    /// Empty means "every sort key in range".
    pub sort_keys: Vec<Blob>,
    pub max_kv_count: i32,
    pub max_kv_size: i32,
    pub no_value: bool,
    pub start_sortkey: Blob,
    pub stop_sortkey: Blob,
    pub start_inclusive: bool,
    pub stop_inclusive: bool,
    pub sort_key_filter: KeyFilter,
    pub reverse: bool,
}

impl Default for MultiGetRequest {
    fn default() -> Self {
        Self {
            hash_key: Blob::empty(),
            sort_keys: Vec::new(),
            max_kv_count: -1,
            max_kv_size: -1,
            no_value: false,
            start_sortkey: Blob::empty(),
            stop_sortkey: Blob::empty(),
            start_inclusive: true,
            stop_inclusive: false,
            sort_key_filter: KeyFilter::default(),
            reverse: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiPutRequest {
    pub hash_key: Blob,
    pub kvs: Vec<KeyValue>,
    pub expire_ts_seconds: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiRemoveRequest {
    pub hash_key: Blob,
    pub sort_keys: Vec<Blob>,
    pub max_count: i64,
}

// -----------------------------------------------------------------------------
// ----- Scan requests ---------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetScannerRequest {
    pub start_key: Blob,
    pub stop_key: Blob,
    pub start_inclusive: bool,
    pub stop_inclusive: bool,
    pub batch_size: i32,
    pub no_value: bool,
    pub hash_key_filter: KeyFilter,
    pub sort_key_filter: KeyFilter,
}

impl Default for GetScannerRequest {
    fn default() -> Self {
        Self {
            start_key: Blob::empty(),
            stop_key: Blob::empty(),
            start_inclusive: true,
            stop_inclusive: false,
            batch_size: 1000,
            no_value: false,
            hash_key_filter: KeyFilter::default(),
            sort_key_filter: KeyFilter::default(),
        }
    }
}

/// Continues a scan opened by `get_scanner`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanRequest {
    pub context_id: i64,
}

// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
