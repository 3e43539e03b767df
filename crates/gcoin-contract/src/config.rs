use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContractError, ContractResult};

/// Tunables for the account contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// First key (inclusive) of the range enumerated by `list_all`.
    pub list_start_key: String,
    /// End key (exclusive) of the range enumerated by `list_all`.
    /// Empty means no upper bound.
    pub list_end_key: String,
    /// Require the caller to own the account on `update`.
    pub owner_checked_update: bool,
    /// Require the caller to own the account on `delete`.
    pub owner_checked_delete: bool,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            list_start_key: "000".into(),
            list_end_key: "999".into(),
            owner_checked_update: false,
            owner_checked_delete: true,
        }
    }
}

impl ContractConfig {
    /// Legacy behaviour: neither `update` nor
    /// `delete` checks ownership.
    pub fn unchecked_writes() -> Self {
        Self {
            owner_checked_update: false,
            owner_checked_delete: false,
            ..Default::default()
        }
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> ContractResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ContractError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ContractResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ContractError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> ContractResult<()> {
        if !self.list_end_key.is_empty() && self.list_start_key > self.list_end_key {
            return Err(ContractError::Config(format!(
                "list_start_key {:?} sorts after list_end_key {:?}",
                self.list_start_key, self.list_end_key
            )));
        }
        Ok(())
    }
}
