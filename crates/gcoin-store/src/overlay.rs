//! Write-set overlay for a single invocation.
//!
//! [`TxOverlay`] sits between an operation and the backing store. Reads see
//! the invocation's own writes first; writes are buffered until
//! [`TxOverlay::commit`] hands them to the backing store as one batch.
//! Dropping the overlay without committing discards every buffered write.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{check_key, check_range, in_range, KeyValue, LedgerStore, StateIterator, WriteOp};

/// Buffered view over a backing [`LedgerStore`].
///
/// A buffered `None` is a pending delete.
pub struct TxOverlay<'a> {
    backing: &'a dyn LedgerStore,
    writes: Mutex<BTreeMap<String, Option<Vec<u8>>>>,
}

impl<'a> TxOverlay<'a> {
    /// Start an empty write set over `backing`.
    pub fn new(backing: &'a dyn LedgerStore) -> Self {
        Self {
            backing,
            writes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of distinct keys with a pending write.
    pub fn pending(&self) -> StoreResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Pending writes in key order.
    pub fn write_set(&self) -> StoreResult<Vec<WriteOp>> {
        Ok(self
            .lock()?
            .iter()
            .map(|(key, value)| match value {
                Some(value) => WriteOp::Put {
                    key: key.clone(),
                    value: value.clone(),
                },
                None => WriteOp::Delete { key: key.clone() },
            })
            .collect())
    }

    /// Apply the write set to the backing store and return the number of
    /// writes applied.
    pub fn commit(self) -> StoreResult<usize> {
        let ops = self.write_set()?;
        if ops.is_empty() {
            return Ok(0);
        }
        let applied = self.backing.apply_batch(ops)?;
        debug!(applied, "write set committed");
        Ok(applied)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, BTreeMap<String, Option<Vec<u8>>>>> {
        self.writes.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl LedgerStore for TxOverlay<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if let Some(pending) = self.lock()?.get(key) {
            return Ok(pending.clone());
        }
        self.backing.get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        check_key(key)?;
        self.lock()?.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        check_key(key)?;
        self.lock()?.insert(key.to_string(), None);
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> StoreResult<StateIterator> {
        check_range(start, end)?;
        let mut merged = BTreeMap::new();
        for entry in self.backing.range_scan(start, end)? {
            let entry = entry?;
            merged.insert(entry.key, entry.value);
        }
        for (key, pending) in self.lock()?.iter() {
            if !in_range(key, start, end) {
                continue;
            }
            match pending {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        let entries = merged
            .into_iter()
            .map(|(key, value)| KeyValue { key, value })
            .collect();
        Ok(StateIterator::from_entries(entries))
    }
}

impl std::fmt::Debug for TxOverlay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self.pending().unwrap_or_default();
        f.debug_struct("TxOverlay")
            .field("pending", &pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLedgerStore;

    fn backing() -> InMemoryLedgerStore {
        let store = InMemoryLedgerStore::new();
        store.put("1001", b"a".to_vec()).unwrap();
        store.put("1002", b"b".to_vec()).unwrap();
        store
    }

    #[test]
    fn reads_see_own_writes() {
        let store = backing();
        let overlay = TxOverlay::new(&store);
        overlay.put("1001", b"changed".to_vec()).unwrap();
        assert_eq!(overlay.get("1001").unwrap(), Some(b"changed".to_vec()));
        // Backing store untouched until commit.
        assert_eq!(store.get("1001").unwrap(), Some(b"a".to_vec()));
    }

    #[test]
    fn pending_delete_hides_backing_value() {
        let store = backing();
        let overlay = TxOverlay::new(&store);
        overlay.delete("1002").unwrap();
        assert!(overlay.get("1002").unwrap().is_none());
        assert!(store.get("1002").unwrap().is_some());
    }

    #[test]
    fn commit_applies_write_set() {
        let store = backing();
        let overlay = TxOverlay::new(&store);
        overlay.put("1001", b"x".to_vec()).unwrap();
        overlay.put("1003", b"y".to_vec()).unwrap();
        overlay.delete("1002").unwrap();
        assert_eq!(overlay.pending().unwrap(), 3);

        let writes_before = store.write_count();
        assert_eq!(overlay.commit().unwrap(), 3);
        assert_eq!(store.write_count() - writes_before, 3);
        assert_eq!(store.get("1001").unwrap(), Some(b"x".to_vec()));
        assert_eq!(store.get("1003").unwrap(), Some(b"y".to_vec()));
        assert!(store.get("1002").unwrap().is_none());
    }

    #[test]
    fn repeated_writes_to_one_key_collapse() {
        let store = backing();
        let overlay = TxOverlay::new(&store);
        overlay.put("1001", b"1".to_vec()).unwrap();
        overlay.put("1001", b"2".to_vec()).unwrap();
        assert_eq!(overlay.commit().unwrap(), 1);
        assert_eq!(store.get("1001").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn drop_without_commit_discards() {
        let store = backing();
        let writes_before = store.write_count();
        {
            let overlay = TxOverlay::new(&store);
            overlay.put("1001", b"lost".to_vec()).unwrap();
        }
        assert_eq!(store.get("1001").unwrap(), Some(b"a".to_vec()));
        assert_eq!(store.write_count(), writes_before);
    }

    #[test]
    fn empty_commit_is_noop() {
        let store = backing();
        let writes_before = store.write_count();
        assert_eq!(TxOverlay::new(&store).commit().unwrap(), 0);
        assert_eq!(store.write_count(), writes_before);
    }

    #[test]
    fn range_scan_merges_pending_writes() {
        let store = backing();
        let overlay = TxOverlay::new(&store);
        overlay.put("1000", b"new".to_vec()).unwrap();
        overlay.put("1002", b"bb".to_vec()).unwrap();
        overlay.delete("1001").unwrap();
        overlay.put("zzz", b"out of range".to_vec()).unwrap();

        let entries: Vec<KeyValue> = overlay
            .range_scan("000", "999")
            .unwrap()
            .map(Result::unwrap)
            .collect();
        let keys: Vec<&str> = entries.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["1000", "1002"]);
        assert_eq!(entries[1].value, b"bb".to_vec());
    }

    #[test]
    fn write_set_is_key_ordered() {
        let store = backing();
        let overlay = TxOverlay::new(&store);
        overlay.put("b", b"2".to_vec()).unwrap();
        overlay.delete("a").unwrap();
        let ops = overlay.write_set().unwrap();
        assert_eq!(ops[0], WriteOp::Delete { key: "a".into() });
        assert_eq!(ops[1].key(), "b");
    }
}
