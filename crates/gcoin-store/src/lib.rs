//! Key-value ledger storage for green-coin.
//!
//! The contract never owns persistence. It talks to a [`LedgerStore`]: a
//! string-keyed byte store with point get/put/delete and an ascending range
//! scan. The hosting platform supplies the real backend; this crate ships an
//! in-memory one for tests and embedding, plus a write-set overlay that makes
//! a whole invocation commit or vanish as a unit.
//!
//! # Storage Backends
//!
//! - [`InMemoryLedgerStore`] -- `BTreeMap`-based store with write counters
//! - [`TxOverlay`] -- buffers one invocation's writes over any other store
//!
//! # Design Rules
//!
//! 1. The store never interprets values -- it is a pure key-value store.
//! 2. Range scans are half-open `[start, end)` and ascend by key bytes.
//! 3. An empty `end` key means "no upper bound".
//! 4. Iterators are finite; `None` is the end-of-sequence signal.
//! 5. Empty keys are rejected on every write path.

pub mod error;
pub mod memory;
pub mod overlay;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryLedgerStore;
pub use overlay::TxOverlay;
pub use traits::{KeyValue, LedgerStore, StateIterator, WriteOp};
