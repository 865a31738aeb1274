use bytes::Bytes;
use std::fmt;

// -----------------------------------------------------------------------------
// ----- Gpid ------------------------------------------------------------------

/// Identifies one partition of a table: `(app_id, partition_index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gpid {
    pub app_id: i32,
    pub partition_index: i32,
}

impl Gpid {
    pub const fn new(app_id: i32, partition_index: i32) -> Self {
        Self {
            app_id,
            partition_index,
        }
    }
}

impl fmt::Display for Gpid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_id, self.partition_index)
    }
}

// -----------------------------------------------------------------------------
// ----- Blob ------------------------------------------------------------------

/// Opaque key or value bytes. Cloning shares the underlying buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(Bytes);

// -----------------------------------------------------------------------------
// ----- Blob: Static ----------------------------------------------------------

impl Blob {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    pub const fn empty() -> Self {
        Self(Bytes::new())
    }

    pub fn from_static(data: &'static [u8]) -> Self {
        Self(Bytes::from_static(data))
    }
}

// -----------------------------------------------------------------------------
// ----- Blob: Public ----------------------------------------------------------

impl Blob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes> for Blob {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl From<Vec<u8>> for Blob {
    fn from(value: Vec<u8>) -> Self {
        Self(Bytes::from(value))
    }
}

impl From<&'static str> for Blob {
    fn from(value: &'static str) -> Self {
        Self(Bytes::from_static(value.as_bytes()))
    }
}

// -----------------------------------------------------------------------------
// ----- KeyValue --------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValue {
    pub key: Blob,
    pub value: Blob,
}

impl KeyValue {
    pub fn new(key: impl Into<Blob>, value: impl Into<Blob>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// ----- Tests -----------------------------------------------------------------


// -----------------------------------------------------------------------------
// -----------------------------------------------------------------------------
