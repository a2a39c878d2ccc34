//! Query term value type

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::storage::StorageKey;
use crate::domain::DomainError;

/// Message returned to callers that supply no usable `q`
pub const INVALID_TERM_MESSAGE: &str = "no valid q supplied";

/// A raw dictionary term as submitted by a caller.
///
/// Terms are never normalized: the ledger is keyed by the exact string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(String);

impl Term {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::validation(INVALID_TERM_MESSAGE));
        }

        Ok(Self(value))
    }

    /// Parses an optional query value; absent and empty values are rejected
    pub fn parse(value: Option<&str>) -> Result<Self, DomainError> {
        match value {
            Some(v) => Self::new(v),
            None => Err(DomainError::validation(INVALID_TERM_MESSAGE)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for Term {
    fn as_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_preserves_form() {
        let term = Term::new(" 食べる ").unwrap();
        assert_eq!(term.as_str(), " 食べる ");
        assert_eq!(term.as_key(), " 食べる ");
    }

    #[test]
    fn test_empty_term_rejected() {
        let err = Term::new("").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: no valid q supplied");
    }

    #[test]
    fn test_parse_missing_rejected() {
        assert!(matches!(
            Term::parse(None),
            Err(DomainError::Validation { .. })
        ));
        assert!(Term::parse(Some("猫")).is_ok());
    }
}
