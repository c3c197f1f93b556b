//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod diagnosis_api;
pub mod exchange_logger;
pub mod exporter;
pub mod progress;
