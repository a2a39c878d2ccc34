//! Regex filters over a single text field of a stored entity

use regex::Regex;
use serde::Serialize;

use crate::domain::DomainError;

/// Filter matching entities whose top-level string `field` matches `pattern`
///
/// The pattern is kept as source text so that each backend can evaluate it
/// natively (PostgreSQL `~`, or the `regex` crate for in-memory storage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFilter {
    pub field: String,
    pub pattern: String,
}

impl PatternFilter {
    pub fn new(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// Compiles the pattern for in-process matching
    pub fn compile(&self) -> Result<CompiledFilter, DomainError> {
        let regex = Regex::new(&self.pattern).map_err(|e| {
            DomainError::storage(format!("Invalid filter pattern '{}': {}", self.pattern, e))
        })?;

        Ok(CompiledFilter {
            field: self.field.clone(),
            regex,
        })
    }
}

/// A [`PatternFilter`] ready to be evaluated against entities in memory
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    field: String,
    regex: Regex,
}

impl CompiledFilter {
    /// Returns true when the entity's field is a string matching the pattern.
    /// Missing or non-string fields never match.
    pub fn matches<E: Serialize>(&self, entity: &E) -> bool {
        let Ok(value) = serde_json::to_value(entity) else {
            return false;
        };

        value
            .get(&self.field)
            .and_then(serde_json::Value::as_str)
            .is_some_and(|text| self.regex.is_match(text))
    }
}
