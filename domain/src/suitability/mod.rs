//! Suitability subdomain - local, rule-based GLP-1 suitability judgment.
//!
//! - [`scorer::assess`]: maps a [`PatientProfile`](crate::PatientProfile) to a verdict
//! - [`verdict::SuitabilityVerdict`]: level plus triggered risk factors

pub mod scorer;
pub mod verdict;
