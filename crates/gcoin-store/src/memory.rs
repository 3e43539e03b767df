use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{check_key, check_range, KeyValue, LedgerStore, StateIterator, WriteOp};

/// In-memory, `BTreeMap`-based ledger store.
///
/// Intended for tests and embedding. Keys are kept sorted so range scans
/// come out in ascending order without extra work. Every put and delete is
/// counted, which lets tests assert that a rejected operation wrote nothing.
pub struct InMemoryLedgerStore {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    puts: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryLedgerStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::from_snapshot(BTreeMap::new())
    }

    /// Create a store pre-populated with `state`. Seeding is not counted
    /// as writes.
    pub fn from_snapshot(state: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            state: RwLock::new(state),
            puts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// Copy of the full key/value state.
    pub fn snapshot(&self) -> StoreResult<BTreeMap<String, Vec<u8>>> {
        Ok(self.read_state()?.clone())
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_state()?.len())
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_state()?.is_empty())
    }

    /// Number of puts issued since creation.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of deletes issued since creation.
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Total writes (puts plus deletes) issued since creation.
    pub fn write_count(&self) -> usize {
        self.put_count() + self.delete_count()
    }

    fn read_state(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.state.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write_state(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.state.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.read_state()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        check_key(key)?;
        self.write_state()?.insert(key.to_string(), value);
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        check_key(key)?;
        self.write_state()?.remove(key);
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> StoreResult<StateIterator> {
        check_range(start, end)?;
        let state = self.read_state()?;
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end)
        };
        // The lock cannot outlive this call, so the range is copied out.
        let entries: Vec<KeyValue> = state
            .range::<str, _>((Bound::Included(start), upper))
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        debug!(start, end, count = entries.len(), "range scan");
        Ok(StateIterator::from_entries(entries))
    }

    fn apply_batch(&self, ops: Vec<WriteOp>) -> StoreResult<usize> {
        for op in &ops {
            check_key(op.key())?;
        }
        let mut state = self.write_state()?;
        for op in &ops {
            match op {
                WriteOp::Put { key, value } => {
                    state.insert(key.clone(), value.clone());
                    self.puts.fetch_add(1, Ordering::SeqCst);
                }
                WriteOp::Delete { key } => {
                    state.remove(key);
                    self.deletes.fetch_add(1, Ordering::SeqCst);
                }
            }
        }
        Ok(ops.len())
    }
}

impl std::fmt::Debug for InMemoryLedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = self.read_state().map(|s| s.len()).unwrap_or_default();
        f.debug_struct("InMemoryLedgerStore")
            .field("key_count", &keys)
            .field("writes", &self.write_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(iter: StateIterator) -> Vec<String> {
        iter.map(|kv| kv.unwrap().key).collect()
    }

    fn seeded() -> InMemoryLedgerStore {
        let store = InMemoryLedgerStore::new();
        for key in ["1002", "000", "1001", "999", "500", "abc"] {
            store.put(key, key.as_bytes().to_vec()).unwrap();
        }
        store
    }

    // -----------------------------------------------------------------------
    // Point operations
    // -----------------------------------------------------------------------

    #[test]
    fn put_and_get() {
        let store = InMemoryLedgerStore::new();
        store.put("1001", b"hello".to_vec()).unwrap();
        assert_eq!(store.get("1001").unwrap(), Some(b"hello".to_vec()));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryLedgerStore::new();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn put_replaces_value() {
        let store = InMemoryLedgerStore::new();
        store.put("k", b"one".to_vec()).unwrap();
        store.put("k", b"two".to_vec()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn delete_removes_key() {
        let store = InMemoryLedgerStore::new();
        store.put("k", b"v".to_vec()).unwrap();
        store.delete("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        // Deleting again is a no-op.
        store.delete("k").unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn empty_key_rejected() {
        let store = InMemoryLedgerStore::new();
        assert!(matches!(
            store.put("", b"v".to_vec()),
            Err(StoreError::EmptyKey)
        ));
        assert!(matches!(store.delete(""), Err(StoreError::EmptyKey)));
        assert_eq!(store.write_count(), 0);
    }

    // -----------------------------------------------------------------------
    // Range scans
    // -----------------------------------------------------------------------

    #[test]
    fn range_scan_is_ascending_and_half_open() {
        let store = seeded();
        let scanned = keys(store.range_scan("000", "999").unwrap());
        assert_eq!(scanned, vec!["000", "1001", "1002", "500"]);
    }

    #[test]
    fn range_scan_with_open_end() {
        let store = seeded();
        let scanned = keys(store.range_scan("500", "").unwrap());
        assert_eq!(scanned, vec!["500", "999", "abc"]);
    }

    #[test]
    fn range_scan_empty_range() {
        let store = seeded();
        assert!(keys(store.range_scan("600", "600").unwrap()).is_empty());
    }

    #[test]
    fn range_scan_inverted_range_is_error() {
        let store = seeded();
        assert!(matches!(
            store.range_scan("999", "000"),
            Err(StoreError::InvalidRange { .. })
        ));
    }

    #[test]
    fn range_scan_is_restartable() {
        let store = seeded();
        let first = keys(store.range_scan("000", "999").unwrap());
        let second = keys(store.range_scan("000", "999").unwrap());
        assert_eq!(first, second);
    }

    // -----------------------------------------------------------------------
    // Batches and counters
    // -----------------------------------------------------------------------

    #[test]
    fn apply_batch_applies_in_order() {
        let store = InMemoryLedgerStore::new();
        let applied = store
            .apply_batch(vec![
                WriteOp::Put {
                    key: "a".into(),
                    value: b"1".to_vec(),
                },
                WriteOp::Put {
                    key: "b".into(),
                    value: b"2".to_vec(),
                },
                WriteOp::Delete { key: "a".into() },
            ])
            .unwrap();
        assert_eq!(applied, 3);
        assert!(store.get("a").unwrap().is_none());
        assert_eq!(store.get("b").unwrap(), Some(b"2".to_vec()));
        assert_eq!(store.put_count(), 2);
        assert_eq!(store.delete_count(), 1);
    }

    #[test]
    fn apply_batch_with_empty_key_writes_nothing() {
        let store = InMemoryLedgerStore::new();
        let result = store.apply_batch(vec![
            WriteOp::Put {
                key: "a".into(),
                value: b"1".to_vec(),
            },
            WriteOp::Delete { key: String::new() },
        ]);
        assert!(matches!(result, Err(StoreError::EmptyKey)));
        assert!(store.is_empty().unwrap());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn snapshot_roundtrip_does_not_count_writes() {
        let store = seeded();
        let copy = InMemoryLedgerStore::from_snapshot(store.snapshot().unwrap());
        assert_eq!(copy.len().unwrap(), 6);
        assert_eq!(copy.write_count(), 0);
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(seeded());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    assert_eq!(store.get("1001").unwrap(), Some(b"1001".to_vec()));
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn debug_format() {
        let store = seeded();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryLedgerStore"));
        assert!(debug.contains("key_count"));
    }
}
