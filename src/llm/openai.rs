use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::config::LlmSettings;
use crate::errors::GuardiaoError;
use super::provider::{http_client, status_error, TextGenerator};
use super::types::LLMResponse;
use tracing::debug;

/// Chat-completions client. Also serves OpenAI-compatible endpoints
/// (OpenRouter, Perplexity, Ollama) through `with_base_url`.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    label: String,
}

impl OpenAIProvider {
    pub fn new(settings: &LlmSettings) -> Result<Self, GuardiaoError> {
        Self::with_base_url(settings, "openai", "https://api.openai.com/v1", "gpt-4o")
    }

    pub fn with_base_url(
        settings: &LlmSettings,
        label: &str,
        default_url: &str,
        default_model: &str,
    ) -> Result<Self, GuardiaoError> {
        let base_url = settings.base_url.as_deref().unwrap_or(default_url);
        Ok(Self {
            client: http_client(settings.timeout)?,
            api_key: settings.api_key.clone(),
            model: settings.model.clone().unwrap_or_else(|| default_model.to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_tokens: settings.max_tokens,
            label: label.to_string(),
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAIProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, GuardiaoError> {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(json!({"role": "system", "content": sys}));
        }
        messages.push(json!({"role": "user", "content": prompt}));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
        });

        let mut request = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }
        let resp = request.send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        if let Some(err) = status_error(&self.label, status, &text) {
            return Err(err);
        }

        let data: Value = serde_json::from_str(&text)
            .map_err(|e| GuardiaoError::MalformedResponse(format!("Failed to parse {} response: {}", self.label, e)))?;

        if let Some(error) = data.get("error") {
            return Err(GuardiaoError::LlmApi(error["message"].as_str().unwrap_or("Unknown").to_string()));
        }

        let content = data["choices"][0]["message"]["content"].as_str()
            .ok_or_else(|| GuardiaoError::MalformedResponse(format!("No content in {} response", self.label)))?
            .to_string();
        let input_tokens = data["usage"]["prompt_tokens"].as_u64();
        let output_tokens = data["usage"]["completion_tokens"].as_u64();

        debug!(provider = %self.label, model = %self.model, input_tokens, output_tokens, "Chat completion");

        Ok(LLMResponse {
            content,
            input_tokens,
            output_tokens,
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str { &self.label }
    fn model_name(&self) -> &str { &self.model }
}
