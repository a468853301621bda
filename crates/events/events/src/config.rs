//! Registry configuration.

use serde::{Deserialize, Serialize};

use crate::error::EventResult;
use crate::registration::DEFAULT_PRIORITY;

/// Registry-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Priority stored on subscriptions that do not set one.
    pub default_priority: i32,
    /// Emit a trace line for every callback invocation.
    pub log_dispatch: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
            log_dispatch: true,
        }
    }
}

impl RegistryConfig {
    /// Parses configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> EventResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Sets the default priority.
    pub fn with_default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }

    /// Enables or disables per-invocation trace logging.
    pub fn with_log_dispatch(mut self, enabled: bool) -> Self {
        self.log_dispatch = enabled;
        self
    }
}
