use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute carrying the caller's enrollment id.
pub const ENROLLMENT_ID_ATTR: &str = "hf.EnrollmentID";
/// Attribute carrying the caller's affiliation.
pub const AFFILIATION_ATTR: &str = "hf.Affiliation";

/// Affiliation allowed to enumerate accounts.
pub const AFFILIATION_SEARCHER: &str = "searcher";
/// Affiliation allowed to mint.
pub const AFFILIATION_MAKER: &str = "maker";
/// Affiliation that implies both of the above.
pub const AFFILIATION_EVERY: &str = "every";

/// The invoking caller, as verified by the hosting platform.
pub trait IdentityContext: Send + Sync {
    /// Unique label of the caller (its enrollment id).
    fn caller_label(&self) -> &str;

    /// Returns `true` if the caller's credential carries attribute `name`
    /// with exactly `value`.
    fn has_attribute(&self, name: &str, value: &str) -> bool;
}

/// Identity built from an enrollment id and a set of attribute claims.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIdentity {
    pub enrollment_id: String,
    pub attributes: BTreeMap<String, String>,
}

impl ClientIdentity {
    /// An identity with no attributes beyond its enrollment id.
    pub fn new(enrollment_id: impl Into<String>) -> Self {
        Self {
            enrollment_id: enrollment_id.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add an attribute claim.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Shorthand for `with_attribute(AFFILIATION_ATTR, value)`.
    pub fn with_affiliation(self, value: impl Into<String>) -> Self {
        self.with_attribute(AFFILIATION_ATTR, value)
    }
}

impl IdentityContext for ClientIdentity {
    fn caller_label(&self) -> &str {
        &self.enrollment_id
    }

    fn has_attribute(&self, name: &str, value: &str) -> bool {
        if name == ENROLLMENT_ID_ATTR {
            return self.enrollment_id == value;
        }
        self.attributes.get(name).is_some_and(|v| v == value)
    }
}
