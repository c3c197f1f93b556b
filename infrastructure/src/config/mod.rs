//! Configuration file loading for glp1-advisor
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GLP1_ADVISOR_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./glp1-advisor.toml` or `./.glp1-advisor.toml`
//! 4. Global: `<config dir>/glp1-advisor/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileApiConfig, FileConfig, FileExportConfig, FileFallbackConfig, FileOutputConfig,
};
pub use loader::ConfigLoader;
