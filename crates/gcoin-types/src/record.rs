use serde::{Deserialize, Serialize};

use crate::account::Account;

/// One entry of an account listing.
///
/// Values that decode as an [`Account`] are returned structured; anything
/// else written under the key (for example by a raw update) is returned as
/// its text instead of failing the whole listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Account(Account),
    Raw(String),
}

impl Record {
    /// Decode stored bytes, falling back to the raw text.
    pub fn decode(bytes: &[u8]) -> Self {
        match Account::from_bytes(bytes) {
            Ok(account) => Self::Account(account),
            Err(_) => Self::Raw(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    /// The decoded account, if this entry is one.
    pub fn as_account(&self) -> Option<&Account> {
        match self {
            Self::Account(account) => Some(account),
            Self::Raw(_) => None,
        }
    }
}
