//! Export configuration from TOML (`[export]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw `[export]` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExportConfig {
    /// Directory result bundles are written to
    pub directory: PathBuf,
}

impl Default for FileExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}
