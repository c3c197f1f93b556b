//! Fallback configuration from TOML (`[fallback]` section)

use serde::{Deserialize, Serialize};

/// Raw `[fallback]` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFallbackConfig {
    /// Substitute demo results when the live service fails
    pub enabled: bool,
    /// Skip the live service entirely
    pub force_mock: bool,
}

impl Default for FileFallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            force_mock: false,
        }
    }
}
