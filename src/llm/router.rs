use crate::config::credentials::api_key_env_var;
use crate::config::LlmSettings;
use crate::errors::GuardiaoError;
use super::provider::TextGenerator;
use super::anthropic::AnthropicProvider;
use super::openai::OpenAIProvider;
use super::gemini::GeminiProvider;

pub const SUPPORTED_PROVIDERS: &[&str] = &["anthropic", "openai", "gemini", "openrouter", "perplexity", "local"];

pub fn create_provider(settings: &LlmSettings) -> Result<Box<dyn TextGenerator>, GuardiaoError> {
    let provider = settings.provider.as_str();
    if provider != "local" && settings.api_key.is_empty() {
        let hint = api_key_env_var(provider)
            .map(|var| format!(" (set llm.api_key or {})", var))
            .unwrap_or_default();
        return Err(GuardiaoError::Config(format!("No API key configured for provider '{}'{}", provider, hint)));
    }

    match provider {
        "anthropic" => Ok(Box::new(AnthropicProvider::new(settings)?)),
        "openai" => Ok(Box::new(OpenAIProvider::new(settings)?)),
        "gemini" => Ok(Box::new(GeminiProvider::new(settings)?)),
        "openrouter" => Ok(Box::new(OpenAIProvider::with_base_url(
            settings,
            "openrouter",
            "https://openrouter.ai/api/v1",
            "anthropic/claude-sonnet-4.5",
        )?)),
        "perplexity" => Ok(Box::new(OpenAIProvider::with_base_url(
            settings,
            "perplexity",
            "https://api.perplexity.ai",
            "sonar",
        )?)),
        "local" => Ok(Box::new(OpenAIProvider::with_base_url(
            settings,
            "local",
            "http://localhost:11434/v1",
            "qwen2.5:7b",
        )?)),
        _ => Err(GuardiaoError::Config(format!(
            "Unknown LLM provider: {} (expected one of {})",
            provider,
            SUPPORTED_PROVIDERS.join(", ")
        ))),
    }
}
