use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::errors::GuardiaoError;
use super::types::LLMResponse;

/// The text-generation capability: free-form instruction in, untrusted text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<LLMResponse, GuardiaoError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}

/// HTTP client with the per-request timeout every provider shares.
pub(crate) fn http_client(timeout: Duration) -> Result<Client, GuardiaoError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GuardiaoError::Internal(format!("Failed to build HTTP client: {}", e)))
}

/// Map an HTTP status to the error the retry policy understands.
pub(crate) fn status_error(provider: &str, status: reqwest::StatusCode, body: &str) -> Option<GuardiaoError> {
    match status.as_u16() {
        200..=299 => None,
        401 | 403 => Some(GuardiaoError::Authentication(format!("Invalid {} API key", provider))),
        402 => Some(GuardiaoError::Billing(format!("{} billing: {}", provider, body))),
        429 => Some(GuardiaoError::RateLimit(format!("{} rate limit exceeded", provider))),
        code => Some(GuardiaoError::LlmApi(format!("{} returned HTTP {}: {}", provider, code, body))),
    }
}
