//! Application layer for glp1-advisor
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    diagnosis_api::{ApiError, DiagnosisApi, SessionGuard, UNKNOWN_ERROR},
    exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger},
    exporter::{ExportError, ResultExporter},
    progress::{AssessmentProgress, AssessmentStep, NoProgress},
};
pub use use_cases::run_assessment::{AssessmentError, RunAssessmentUseCase};
pub use use_cases::scenarios::{Scenario, reference_scenarios};
