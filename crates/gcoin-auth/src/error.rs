use thiserror::Error;

/// Authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The caller does not assert any of the allowed attribute values.
    #[error("caller lacks {attribute} in [{}]", .allowed.join(", "))]
    MissingAffiliation {
        attribute: String,
        allowed: Vec<String>,
    },

    /// The caller is not the owner of the account.
    #[error("caller {caller} is not the owner of account {account}")]
    NotOwner { account: String, caller: String },

    /// Minting is only allowed into the caller's own account.
    #[error("caller {caller} cannot mint into account {account} owned by another identity")]
    ForeignMint { account: String, caller: String },

    /// Transfers may only be initiated by the sender account's owner.
    #[error("only {owner} can transfer from account {account}")]
    ForeignTransfer { account: String, owner: String },
}
