//! Diagnosis subdomain - what the remote diagnostic service hands back.
//!
//! - [`session::SessionId`]: opaque per-analysis session handle
//! - [`analysis::AnalysisReport`]: ranked candidate conditions plus the raw payload

pub mod analysis;
pub mod session;
