use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::sentence::{ExampleSentence, LookupResponse, SentenceSource};
use crate::domain::DomainError;

const SOURCE_NAME: &str = "immersion_kit";
const LOOKUP_PATH: &str = "/look_up_dictionary";

pub const DEFAULT_BASE_URL: &str = "https://api.immersionkit.com";

/// Immersion Kit dictionary lookup over HTTP
#[derive(Debug, Clone)]
pub struct ImmersionKitClient {
    client: reqwest::Client,
    base_url: String,
}

impl ImmersionKitClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn lookup_url(&self) -> String {
        format!("{}{}", self.base_url, LOOKUP_PATH)
    }
}

#[async_trait]
impl SentenceSource for ImmersionKitClient {
    async fn look_up(&self, keyword: &str) -> Result<Vec<ExampleSentence>, DomainError> {
        let response = self
            .client
            .get(self.lookup_url())
            .query(&[("keyword", keyword)])
            .send()
            .await
            .map_err(|e| DomainError::upstream(SOURCE_NAME, format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::upstream(
                SOURCE_NAME,
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        let body: LookupResponse = response.json().await.map_err(|e| {
            DomainError::upstream(SOURCE_NAME, format!("Failed to parse response: {}", e))
        })?;

        let examples = body.into_examples()?;
        debug!(keyword, count = examples.len(), "Upstream lookup returned");

        Ok(examples)
    }
}
