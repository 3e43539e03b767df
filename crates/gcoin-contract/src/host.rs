//! Host adapter: invoke operations by name with textual arguments.
//!
//! This is the seam a ledger platform plugs into. For each invocation the
//! host resolves the operation in the registry, checks arity, runs it over a
//! fresh [`TxOverlay`], and commits the write set only when the operation
//! succeeded and is marked as mutating. A failure at any step, including
//! after a transfer has already debited the sender, leaves the backing store
//! untouched.

use std::sync::Mutex;

use gcoin_auth::IdentityContext;
use gcoin_store::{LedgerStore, StoreError, TxOverlay};
use gcoin_types::{parse_amount, Record};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::context::InvocationContext;
use crate::contract::AccountContract;
use crate::error::{ContractError, ContractResult};
use crate::registry::{lookup, Operation, OperationDescriptor};

/// One entry of a `list_all` response payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListedRecord {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: Record,
}

/// Result of a successful invocation.
#[derive(Clone, Debug, Serialize)]
pub struct Response {
    pub tx_id: Uuid,
    pub operation: Operation,
    pub payload: Value,
    /// Writes committed to the backing store.
    pub writes: usize,
}

/// Runs contract operations against a backing store.
///
/// Invocations are serialized: each one runs to completion (including its
/// commit) before the next starts, so concurrent callers never interleave
/// the read-modify-write steps of a transfer.
pub struct ContractHost<S> {
    store: S,
    contract: AccountContract,
    serial: Mutex<()>,
}

impl<S: LedgerStore> ContractHost<S> {
    pub fn new(store: S, contract: AccountContract) -> Self {
        Self {
            store,
            contract,
            serial: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn contract(&self) -> &AccountContract {
        &self.contract
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Invoke `name` as `identity` with positional `args`.
    pub fn invoke<A: AsRef<str>>(
        &self,
        identity: &dyn IdentityContext,
        name: &str,
        args: &[A],
    ) -> ContractResult<Response> {
        let descriptor =
            lookup(name).ok_or_else(|| ContractError::UnknownOperation(name.to_string()))?;
        if args.len() != descriptor.arity() {
            return Err(ContractError::InvalidArguments {
                operation: descriptor.name.to_string(),
                expected: descriptor.arity(),
                actual: args.len(),
            });
        }
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        let _serial = self.serial.lock().map_err(|_| StoreError::LockPoisoned)?;
        let overlay = TxOverlay::new(&self.store);
        let ctx = InvocationContext::new(&overlay, identity);
        let tx_id = ctx.tx_id;

        let payload = match self.dispatch(&ctx, descriptor, &args) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    tx = %tx_id,
                    operation = descriptor.name,
                    caller = ctx.caller(),
                    error = %e,
                    "invocation failed; write set discarded"
                );
                return Err(e);
            }
        };

        let writes = if descriptor.mutates {
            overlay.commit()?
        } else {
            debug!(tx = %tx_id, operation = descriptor.name, "read-only invocation");
            0
        };
        info!(tx = %tx_id, operation = descriptor.name, writes, "invocation complete");

        Ok(Response {
            tx_id,
            operation: descriptor.operation,
            payload,
            writes,
        })
    }

    fn dispatch(
        &self,
        ctx: &InvocationContext<'_>,
        descriptor: &OperationDescriptor,
        args: &[&str],
    ) -> ContractResult<Value> {
        let contract = &self.contract;
        let payload = match descriptor.operation {
            Operation::Exists => Value::Bool(contract.exists(ctx, args[0])?),
            Operation::Create => {
                contract.create(ctx, args[0], args[1])?;
                Value::Null
            }
            Operation::Read => {
                let account = contract.read(ctx, args[0])?;
                to_payload(args[0], &account)?
            }
            Operation::Update => {
                contract.update(ctx, args[0], args[1].as_bytes())?;
                Value::Null
            }
            Operation::Delete => {
                contract.delete(ctx, args[0])?;
                Value::Null
            }
            Operation::ListAll => {
                let listed: Vec<ListedRecord> = contract
                    .list_all(ctx)?
                    .into_iter()
                    .map(|(key, record)| ListedRecord { key, record })
                    .collect();
                to_payload("*", &listed)?
            }
            Operation::Mint => {
                let amount = amount_arg(args[2])?;
                Value::from(contract.mint(ctx, args[0], args[1], amount)?)
            }
            Operation::Transfer => {
                let amount = amount_arg(args[3])?;
                Value::from(contract.transfer(ctx, args[0], args[1], args[2], amount)?)
            }
        };
        Ok(payload)
    }
}

impl<S> std::fmt::Debug for ContractHost<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractHost")
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

fn amount_arg(text: &str) -> ContractResult<i64> {
    parse_amount(text).map_err(|e| ContractError::InvalidAmount(e.to_string()))
}

fn to_payload<T: Serialize>(account: &str, value: &T) -> ContractResult<Value> {
    serde_json::to_value(value).map_err(|e| ContractError::Codec {
        account: account.to_string(),
        reason: e.to_string(),
    })
}
