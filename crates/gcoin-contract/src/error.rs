use gcoin_auth::AuthError;
use gcoin_store::StoreError;

/// Errors surfaced by contract operations.
///
/// Every precondition failure is raised before the operation issues its
/// first write.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("The account {0} already exists")]
    AlreadyExists(String),

    #[error("The account {0} does not exist")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("account {account} holds {balance}, cannot transfer {requested}")]
    InsufficientFunds {
        account: String,
        balance: u64,
        requested: u64,
    },

    #[error("account {account} is not a valid record: {reason}")]
    Codec { account: String, reason: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("{operation} expects {expected} arguments, got {actual}")]
    InvalidArguments {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ContractError {
    /// Returns `true` for authorization failures.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Result alias for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;
