//! Output format value object

use serde::{Deserialize, Serialize};

/// How an assessment is rendered
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full report: metrics, verdict, remote candidates, disclaimer (default)
    #[default]
    Full,
    /// Only the suitability verdict
    Summary,
    /// The exportable JSON bundle
    Json,
}
