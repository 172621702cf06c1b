use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::config::LlmSettings;
use crate::errors::GuardiaoError;
use super::provider::{http_client, status_error, TextGenerator};
use super::types::LLMResponse;

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl GeminiProvider {
    pub fn new(settings: &LlmSettings) -> Result<Self, GuardiaoError> {
        Ok(Self {
            client: http_client(settings.timeout)?,
            api_key: settings.api_key.clone(),
            model: settings.model.clone().unwrap_or_else(|| "gemini-2.5-flash".to_string()),
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            max_tokens: settings.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, GuardiaoError> {
        let mut body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "maxOutputTokens": self.max_tokens,
            }
        });
        if let Some(sys) = system {
            body["systemInstruction"] = json!({"parts": [{"text": sys}]});
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let resp = self.client.post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if let Some(err) = status_error("Gemini", status, &text) {
            return Err(err);
        }

        let data: Value = serde_json::from_str(&text)
            .map_err(|e| GuardiaoError::MalformedResponse(format!("Parse error: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(GuardiaoError::LlmApi(error["message"].as_str().unwrap_or("Unknown").to_string()));
        }

        // Multi-part candidates are concatenated
        let content: String = data["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .ok_or_else(|| GuardiaoError::MalformedResponse("No candidates in Gemini response".into()))?;

        let input_tokens = data["usageMetadata"]["promptTokenCount"].as_u64();
        let output_tokens = data["usageMetadata"]["candidatesTokenCount"].as_u64();

        Ok(LLMResponse {
            content,
            input_tokens,
            output_tokens,
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str { "gemini" }
    fn model_name(&self) -> &str { &self.model }
}
