use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("amount {0} is negative")]
    NegativeAmount(i64),

    #[error("amount {0:?} is not an integer")]
    NotAnInteger(String),

    #[error("crediting {amount} to balance {balance} overflows")]
    BalanceOverflow { balance: u64, amount: u64 },

    #[error("codec error: {0}")]
    Codec(String),
}
