//! Session identifier value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Opaque identifier issued by the diagnostic service for one analysis
///
/// Lives only as long as the client holding it. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidSession("empty identifier".to_string()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_rejected() {
        assert!(SessionId::new("").is_err());
        assert!(SessionId::new("  ").is_err());
    }

    #[test]
    fn test_serializes_transparently() {
        let id = SessionId::new("abc-123").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
    }
}
