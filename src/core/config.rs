//! Engine configuration (`dynvars.yaml`).

use super::error::ConfigError;
use super::validator::{Blacklist, DEFAULT_BLACKLIST};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings that shape an [`Injector`](super::injector::Injector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Forbidden substrings for variable names
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,

    /// Screen variable names while injecting, not only on explicit validation
    #[serde(default)]
    pub enforce_blacklist: bool,
}

fn default_blacklist() -> Vec<String> {
    DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            blacklist: default_blacklist(),
            enforce_blacklist: false,
        }
    }
}

impl EngineConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a config from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// An empty token is a substring of every name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.blacklist.iter().position(|t| t.is_empty()) {
            Some(index) => Err(ConfigError::EmptyBlacklistToken(index)),
            None => Ok(()),
        }
    }

    pub fn blacklist(&self) -> Blacklist {
        Blacklist::new(self.blacklist.iter().cloned())
    }
}
