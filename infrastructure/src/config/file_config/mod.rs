//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod api;
mod export;
mod fallback;
mod output;

pub use api::FileApiConfig;
pub use export::FileExportConfig;
pub use fallback::FileFallbackConfig;
pub use output::FileOutputConfig;

use advisor_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Diagnosis service connection
    pub api: FileApiConfig,
    /// Demo fallback behaviour
    pub fallback: FileFallbackConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Result bundle export
    pub export: FileExportConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.api.validate();

        if self.fallback.force_mock && !self.fallback.enabled {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::ConflictingFallback,
                message: "fallback.force_mock is set while fallback.enabled is false; \
                          demo mode will be used"
                    .to_string(),
            });
        }

        issues
    }
}
