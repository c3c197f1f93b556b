//! Result export port
//!
//! Writing the user-requested result bundle somewhere outside the process.

use advisor_domain::ResultBundle;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while exporting a bundle
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize export: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Destination for exported result bundles
pub trait ResultExporter: Send + Sync {
    /// Write the bundle and return where it went
    fn export(&self, bundle: &ResultBundle) -> Result<PathBuf, ExportError>;
}
