use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::config::LlmSettings;
use crate::errors::GuardiaoError;
use super::provider::{http_client, status_error, TextGenerator};
use super::types::LLMResponse;
use tracing::debug;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(settings: &LlmSettings) -> Result<Self, GuardiaoError> {
        Ok(Self {
            client: http_client(settings.timeout)?,
            api_key: settings.api_key.clone(),
            model: settings.model.clone().unwrap_or_else(|| "claude-sonnet-4-5-20250929".to_string()),
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.anthropic.com".to_string()),
            max_tokens: settings.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for AnthropicProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, GuardiaoError> {
        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{"role": "user", "content": prompt}]
        });

        if let Some(sys) = system {
            body["system"] = json!(sys);
        }

        let resp = self.client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if let Some(err) = status_error("Anthropic", status, &text) {
            return Err(err);
        }

        let data: Value = serde_json::from_str(&text)
            .map_err(|e| GuardiaoError::MalformedResponse(format!("Failed to parse Anthropic response: {}", e)))?;

        if let Some(error) = data.get("error") {
            let msg = error["message"].as_str().unwrap_or("Unknown error");
            if msg.contains("billing") || msg.contains("credit") {
                return Err(GuardiaoError::Billing(msg.to_string()));
            }
            return Err(GuardiaoError::LlmApi(msg.to_string()));
        }

        let content = data["content"][0]["text"].as_str()
            .ok_or_else(|| GuardiaoError::MalformedResponse("No content in Anthropic response".into()))?
            .to_string();

        let input_tokens = data["usage"]["input_tokens"].as_u64();
        let output_tokens = data["usage"]["output_tokens"].as_u64();

        debug!(model = %self.model, input_tokens, output_tokens, "Anthropic completion");

        Ok(LLMResponse {
            content,
            input_tokens,
            output_tokens,
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str { "anthropic" }
    fn model_name(&self) -> &str { &self.model }
}
