//! Presentation layer for glp1-advisor
//!
//! This crate contains CLI definitions, output formatters
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{AssessArgs, Cli, Command, OutputFormat};
pub use output::console::{ConsoleFormatter, DISCLAIMER};
pub use output::info::medication_info;
pub use progress::reporter::ProgressReporter;
