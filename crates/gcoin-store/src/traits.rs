use crate::error::{StoreError, StoreResult};

/// A single key/value pair yielded by a range scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// One buffered mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    Put { key: String, value: Vec<u8> },
    Delete { key: String },
}

impl WriteOp {
    /// The key this operation touches.
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// Finite, ascending sequence of key/value pairs produced by a range scan.
///
/// Iteration ends with `None`. Backends whose cursors can fail mid-scan
/// yield an `Err` item; the scan is over after the first error.
pub struct StateIterator {
    inner: Box<dyn Iterator<Item = StoreResult<KeyValue>> + Send>,
}

impl StateIterator {
    /// Wrap a backend cursor.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = StoreResult<KeyValue>> + Send + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    /// Iterator over already materialized entries.
    pub fn from_entries(entries: Vec<KeyValue>) -> Self {
        Self::new(entries.into_iter().map(Ok))
    }

    /// An iterator that is exhausted immediately.
    pub fn empty() -> Self {
        Self::from_entries(Vec::new())
    }
}

impl Iterator for StateIterator {
    type Item = StoreResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for StateIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateIterator").finish_non_exhaustive()
    }
}

/// String-keyed ledger state.
///
/// All implementations must satisfy these invariants:
/// - `get` returns `Ok(None)` for keys that were never written or were deleted.
/// - `put` replaces any previous value; `delete` of a missing key is a no-op.
/// - `range_scan(start, end)` yields keys in `[start, end)` in ascending byte
///   order. An empty `end` means the scan runs to the last key.
/// - The store never interprets values.
pub trait LedgerStore: Send + Sync {
    /// Read the value stored at `key`.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write `value` at `key`.
    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Remove `key`.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Scan `[start, end)` in ascending key order.
    fn range_scan(&self, start: &str, end: &str) -> StoreResult<StateIterator>;

    /// Apply a batch of writes in order.
    ///
    /// Default implementation applies each op in turn. Backends should
    /// override this to make the batch visible atomically.
    fn apply_batch(&self, ops: Vec<WriteOp>) -> StoreResult<usize> {
        let count = ops.len();
        for op in ops {
            match op {
                WriteOp::Put { key, value } => self.put(&key, value)?,
                WriteOp::Delete { key } => self.delete(&key)?,
            }
        }
        Ok(count)
    }
}

/// Reject empty keys.
pub(crate) fn check_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        return Err(StoreError::EmptyKey);
    }
    Ok(())
}

/// Reject ranges whose start sorts after a bounded end.
pub(crate) fn check_range(start: &str, end: &str) -> StoreResult<()> {
    if !end.is_empty() && start > end {
        return Err(StoreError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// Returns `true` if `key` falls inside `[start, end)`.
pub(crate) fn in_range(key: &str, start: &str, end: &str) -> bool {
    key >= start && (end.is_empty() || key < end)
}
