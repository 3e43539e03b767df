//! Green-coin account contract.
//!
//! A stateless set of operations over identity-owned accounts kept in an
//! external key-value ledger:
//!
//! - existence checks and ownership-gated create/read/update/delete
//! - attribute-gated enumeration of every account
//! - attribute-gated, self-only minting
//! - owner-initiated transfers between two accounts
//!
//! [`AccountContract`] holds the rules. [`ContractHost`] is the adapter a
//! ledger platform drives: it dispatches operations by name using the
//! [`registry`] and commits each invocation's writes as one unit.
//!
//! # Quick Start
//!
//! ```rust
//! use gcoin_auth::{ClientIdentity, AFFILIATION_MAKER};
//! use gcoin_contract::{AccountContract, ContractHost};
//! use gcoin_store::InMemoryLedgerStore;
//!
//! let host = ContractHost::new(InMemoryLedgerStore::new(), AccountContract::default());
//! let alice = ClientIdentity::new("alice").with_affiliation(AFFILIATION_MAKER);
//! host.invoke(&alice, "create", &["1001", "alice"]).unwrap();
//! host.invoke(&alice, "mint", &["1001", "alice", "100"]).unwrap();
//! let read = host.invoke(&alice, "read", &["1001"]).unwrap();
//! assert_eq!(read.payload["balance"], 100);
//! ```

pub mod config;
pub mod context;
pub mod contract;
pub mod error;
pub mod host;
pub mod registry;

pub use config::ContractConfig;
pub use context::InvocationContext;
pub use contract::{AccountContract, MINT_OK, TRANSFER_OK};
pub use error::{ContractError, ContractResult};
pub use host::{ContractHost, ListedRecord, Response};
pub use registry::{lookup, Operation, OperationDescriptor, OPERATIONS};
