use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A balance-bearing account record.
///
/// The account id is the ledger key the record is stored under; it is not
/// part of the record itself. The owner is fixed at creation and only the
/// balance changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Enrollment id of the identity that created the account.
    #[serde(rename = "ownerEnrollmentId", alias = "EnrollmentID")]
    pub owner_enrollment_id: String,
    /// Current balance. Unsigned, so it can never go below zero.
    pub balance: u64,
}

impl Account {
    /// A fresh account with a zero balance.
    pub fn new(owner_enrollment_id: impl Into<String>) -> Self {
        Self {
            owner_enrollment_id: owner_enrollment_id.into(),
            balance: 0,
        }
    }

    /// Returns `true` if `enrollment_id` owns this account.
    pub fn is_owned_by(&self, enrollment_id: &str) -> bool {
        self.owner_enrollment_id == enrollment_id
    }

    /// Add `amount` to the balance.
    pub fn credit(&mut self, amount: u64) -> Result<u64, TypeError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(TypeError::BalanceOverflow {
                balance: self.balance,
                amount,
            })?;
        Ok(self.balance)
    }

    /// Subtract `amount` from the balance.
    ///
    /// Returns the new balance, or `None` (balance untouched) when the
    /// account cannot cover the amount.
    pub fn debit(&mut self, amount: u64) -> Option<u64> {
        self.balance = self.balance.checked_sub(amount)?;
        Some(self.balance)
    }

    /// Encode as the JSON bytes stored in the ledger.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|e| TypeError::Codec(e.to_string()))
    }

    /// Decode from stored ledger bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Codec(e.to_string()))
    }
}
