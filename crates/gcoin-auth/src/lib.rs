//! Caller identity and authorization for green-coin.
//!
//! Every invocation runs on behalf of an authenticated caller. The hosting
//! platform verifies the caller's credential; this crate only consumes the
//! result through the [`IdentityContext`] trait: a label naming the caller
//! and a boolean predicate over attribute claims.
//!
//! Authorization decisions are plain functions returning [`AuthError`], so
//! the contract expresses every check as an explicit conditional.
//!
//! # Modules
//!
//! - [`identity`] — [`IdentityContext`] and the [`ClientIdentity`] implementation
//! - [`policy`] — [`AffiliationPolicy`] and [`require_owner`]
//! - [`error`] — [`AuthError`]

pub mod error;
pub mod identity;
pub mod policy;

pub use error::AuthError;
pub use identity::{
    ClientIdentity, IdentityContext, AFFILIATION_ATTR, AFFILIATION_EVERY, AFFILIATION_MAKER,
    AFFILIATION_SEARCHER, ENROLLMENT_ID_ATTR,
};
pub use policy::{require_owner, AffiliationPolicy};
