use async_trait::async_trait;
use crate::errors::{with_retry, GuardiaoError, RetryConfig};
use super::provider::TextGenerator;
use super::types::LLMResponse;

/// Wraps a generator so every completion goes through the retry policy.
pub struct RetryingGenerator {
    inner: Box<dyn TextGenerator>,
    retry: RetryConfig,
}

impl RetryingGenerator {
    pub fn new(inner: Box<dyn TextGenerator>, retry: RetryConfig) -> Self {
        Self { inner, retry }
    }
}

#[async_trait]
impl TextGenerator for RetryingGenerator {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, GuardiaoError> {
        let op = format!("{} completion", self.inner.provider_name());
        with_retry(&op, &self.retry, || self.inner.complete(prompt, system)).await
    }

    fn provider_name(&self) -> &str { self.inner.provider_name() }
    fn model_name(&self) -> &str { self.inner.model_name() }
}
