//! Patient subdomain - the questionnaire record and the features derived from it.
//!
//! - [`profile::PatientProfile`]: demographics plus condition and symptom flags
//! - [`feature::Feature`]: one name/value pair for the remote session

pub mod feature;
pub mod profile;
