use tracing::warn;

use crate::error::AuthError;
use crate::identity::{
    IdentityContext, AFFILIATION_ATTR, AFFILIATION_EVERY, AFFILIATION_MAKER, AFFILIATION_SEARCHER,
};

/// Passes when the caller asserts `attribute` with any of the `allowed`
/// values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffiliationPolicy {
    pub attribute: String,
    pub allowed: Vec<String>,
}

impl AffiliationPolicy {
    pub fn new(attribute: impl Into<String>, allowed: &[&str]) -> Self {
        Self {
            attribute: attribute.into(),
            allowed: allowed.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Who may list every account.
    pub fn searcher() -> Self {
        Self::new(AFFILIATION_ATTR, &[AFFILIATION_SEARCHER, AFFILIATION_EVERY])
    }

    /// Who may mint.
    pub fn maker() -> Self {
        Self::new(AFFILIATION_ATTR, &[AFFILIATION_MAKER, AFFILIATION_EVERY])
    }

    pub fn check(&self, identity: &dyn IdentityContext) -> Result<(), AuthError> {
        let held = self
            .allowed
            .iter()
            .any(|value| identity.has_attribute(&self.attribute, value));
        if held {
            return Ok(());
        }
        warn!(
            caller = identity.caller_label(),
            attribute = %self.attribute,
            "affiliation check failed"
        );
        Err(AuthError::MissingAffiliation {
            attribute: self.attribute.clone(),
            allowed: self.allowed.clone(),
        })
    }
}

/// Passes when the caller's label equals the account's stored owner.
pub fn require_owner(
    identity: &dyn IdentityContext,
    owner: &str,
    account: &str,
) -> Result<(), AuthError> {
    if identity.caller_label() == owner {
        return Ok(());
    }
    warn!(caller = identity.caller_label(), account, "caller is not the account owner");
    Err(AuthError::NotOwner {
        account: account.to_string(),
        caller: identity.caller_label().to_string(),
    })
}
