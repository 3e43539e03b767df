//! Foundation types for green-coin.
//!
//! This crate provides the record and value types shared by every other
//! green-coin crate. It knows nothing about storage or identities.
//!
//! # Key Types
//!
//! - [`Account`] — balance-bearing record stored at an account key
//! - [`Record`] — listing entry: a decoded account or the raw stored text
//! - [`validate_amount`] / [`parse_amount`] — non-negative integer amounts

pub mod account;
pub mod amount;
pub mod error;
pub mod record;

pub use account::Account;
pub use amount::{parse_amount, validate_amount};
pub use error::TypeError;
pub use record::Record;
