//! Upstream example sentence source

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

use super::entity::ExampleSentence;

#[cfg(test)]
use mockall::automock;

/// Keyword lookup against the third-party example sentence API
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SentenceSource: Send + Sync {
    /// Returns every example the source has for `keyword`, possibly none
    async fn look_up(&self, keyword: &str) -> Result<Vec<ExampleSentence>, DomainError>;
}

/// `{ "data": [ { "examples": [...] } ] }`, shared by the upstream API and
/// this service's own responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub data: Vec<LookupData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupData {
    #[serde(default)]
    pub examples: Vec<ExampleSentence>,
}

impl LookupResponse {
    pub fn from_examples(examples: Vec<ExampleSentence>) -> Self {
        Self {
            data: vec![LookupData { examples }],
        }
    }

    /// Takes `data[0].examples`; a response without a first entry is malformed
    pub fn into_examples(self) -> Result<Vec<ExampleSentence>, DomainError> {
        self.data
            .into_iter()
            .next()
            .map(|first| first.examples)
            .ok_or_else(|| DomainError::upstream("lookup", "Response has no data entries"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_examples_takes_first_entry() {
        let response: LookupResponse = serde_json::from_value(json!({
            "data": [
                { "examples": [{ "id": 1, "sentence": "猫がいる" }] },
                { "examples": [{ "id": 2, "sentence": "犬がいる" }] }
            ]
        }))
        .unwrap();

        let examples = response.into_examples().unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].sentence, "猫がいる");
    }

    #[test]
    fn test_into_examples_rejects_empty_data() {
        let response = LookupResponse { data: vec![] };
        assert!(matches!(
            response.into_examples(),
            Err(DomainError::Upstream { .. })
        ));
    }

    #[test]
    fn test_from_examples_envelope() {
        let value = serde_json::to_value(LookupResponse::from_examples(vec![])).unwrap();
        assert_eq!(value, json!({ "data": [{ "examples": [] }] }));
    }
}
