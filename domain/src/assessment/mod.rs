//! Assessment subdomain - one questionnaire run from answers to results.
//!
//! - [`state::AssessmentState`]: explicit `collecting -> submitting -> displaying` lifecycle
//! - [`report::AssessmentReport`]: remote analysis and local verdict side by side
//! - [`bundle::ResultBundle`]: the exportable JSON snapshot

pub mod bundle;
pub mod report;
pub mod state;
