//! Feature value object

use serde::{Deserialize, Serialize};

/// Value submitted for a checked condition or symptom
pub const FLAG_VALUE: &str = "yes";

/// A name/value pair pushed to the remote diagnostic session (Value Object)
///
/// Ordering carries no meaning; a repeated name overwrites the remote value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub value: String,
}

impl Feature {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// A boolean flag feature (`name = yes`)
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, FLAG_VALUE)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}
