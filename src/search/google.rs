use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::credentials::redact_credentials;
use crate::config::SearchSettings;
use crate::errors::{with_retry, GuardiaoError, RetryConfig};
use crate::llm::provider::http_client;
use super::{SearchItem, WebSearch};

const ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// Google Custom Search JSON API client.
pub struct GoogleSearch {
    client: Client,
    api_key: String,
    engine_id: String,
    max_results: u32,
    endpoint: String,
    retry: RetryConfig,
}

impl GoogleSearch {
    pub fn new(settings: &SearchSettings, retry: RetryConfig) -> Result<Self, GuardiaoError> {
        Ok(Self {
            client: http_client(settings.timeout)?,
            api_key: settings.api_key.clone(),
            engine_id: settings.engine_id.clone(),
            max_results: settings.max_results,
            endpoint: ENDPOINT.to_string(),
            retry,
        })
    }

    async fn fetch(&self, query: &str, num: u32) -> Result<Vec<SearchItem>, GuardiaoError> {
        let num = num.clamp(1, self.max_results).to_string();
        let resp = self.client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                let msg = redact_credentials(&e.to_string(), &[&self.api_key]);
                if e.is_timeout() { GuardiaoError::Timeout(msg) } else { GuardiaoError::Network(msg) }
            })?;

        let status = resp.status();
        match status.as_u16() {
            200..=299 => {}
            429 => return Err(GuardiaoError::RateLimit("Custom Search quota exceeded".into())),
            400 | 401 | 403 => {
                return Err(GuardiaoError::Authentication(format!(
                    "Custom Search rejected credentials (HTTP {})",
                    status.as_u16()
                )))
            }
            code => return Err(GuardiaoError::Search(format!("Custom Search returned HTTP {}", code))),
        }

        let data: SearchResponse = resp
            .json()
            .await
            .map_err(|e| GuardiaoError::MalformedResponse(format!("Failed to parse search response: {}", e)))?;
        debug!(query, results = data.items.len(), "Web search completed");
        Ok(data.items)
    }
}

#[async_trait]
impl WebSearch for GoogleSearch {
    async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchItem>, GuardiaoError> {
        with_retry("web search", &self.retry, || self.fetch(query, num)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_items_is_empty() {
        let data: SearchResponse = serde_json::from_str(r#"{"kind": "customsearch#search"}"#).unwrap();
        assert!(data.items.is_empty());
    }

    #[test]
    fn test_items_without_snippet_parse() {
        let data: SearchResponse = serde_json::from_str(
            r#"{"items": [{"title": "Golpe do Pix cresce", "link": "https://g1.globo.com/x", "extra": 1}]}"#,
        )
        .unwrap();
        assert_eq!(data.items.len(), 1);
        assert_eq!(data.items[0].snippet, "");
    }
}
