//! Static table of the contract's operations.
//!
//! The core operations never look at this table. It exists for the host
//! adapter, which needs to know an operation's arity and whether its write
//! set must be committed, and for tooling that lists what can be invoked.

use serde::Serialize;

/// The operations exposed by [`crate::AccountContract`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Exists,
    Create,
    Read,
    Update,
    Delete,
    ListAll,
    Mint,
    Transfer,
}

impl Operation {
    /// The table entry for this operation. `OPERATIONS` is laid out in
    /// declaration order.
    pub fn descriptor(self) -> &'static OperationDescriptor {
        &OPERATIONS[self as usize]
    }
}

/// Static description of one operation.
#[derive(Debug, Serialize)]
pub struct OperationDescriptor {
    pub operation: Operation,
    /// Name used to invoke the operation.
    pub name: &'static str,
    /// Name under which the first deployment of the contract exposed it.
    pub legacy_name: &'static str,
    /// Whether a successful invocation's writes are committed.
    pub mutates: bool,
    /// Positional parameter names.
    pub params: &'static [&'static str],
    pub summary: &'static str,
}

impl OperationDescriptor {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

pub static OPERATIONS: &[OperationDescriptor] = &[
    OperationDescriptor {
        operation: Operation::Exists,
        name: "exists",
        legacy_name: "userExists",
        mutates: false,
        params: &["account_id"],
        summary: "Whether an account is stored under the id",
    },
    OperationDescriptor {
        operation: Operation::Create,
        name: "create",
        legacy_name: "createUser",
        mutates: true,
        params: &["account_id", "owner_enrollment_id"],
        summary: "Register an account with a zero balance",
    },
    OperationDescriptor {
        operation: Operation::Read,
        name: "read",
        legacy_name: "readUser",
        mutates: false,
        params: &["account_id"],
        summary: "Read an account you own",
    },
    OperationDescriptor {
        operation: Operation::Update,
        name: "update",
        legacy_name: "updateUser",
        mutates: true,
        params: &["account_id", "raw_value"],
        summary: "Overwrite the stored value verbatim",
    },
    OperationDescriptor {
        operation: Operation::Delete,
        name: "delete",
        legacy_name: "deleteUser",
        mutates: true,
        params: &["account_id"],
        summary: "Remove an account",
    },
    OperationDescriptor {
        operation: Operation::ListAll,
        name: "list_all",
        legacy_name: "queryAllUsers",
        mutates: false,
        params: &[],
        summary: "List every account in the configured key range",
    },
    OperationDescriptor {
        operation: Operation::Mint,
        name: "mint",
        legacy_name: "createGcoin",
        mutates: true,
        params: &["account_id", "owner_enrollment_id", "amount"],
        summary: "Credit new coins to your own account",
    },
    OperationDescriptor {
        operation: Operation::Transfer,
        name: "transfer",
        legacy_name: "transfervalue",
        mutates: true,
        params: &["sender_id", "receiver_id", "receiver_enrollment_id", "amount"],
        summary: "Move coins from your account to another",
    },
];

/// Find an operation by its name or legacy name.
pub fn lookup(name: &str) -> Option<&'static OperationDescriptor> {
    OPERATIONS
        .iter()
        .find(|d| d.name == name || d.legacy_name == name)
}
