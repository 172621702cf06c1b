use std::path::PathBuf;
use std::time::Duration;
use chrono::Datelike;

use crate::errors::{GuardiaoError, RetryConfig};
use super::credentials::{resolve_api_key, resolve_credential};
use super::types::{CollectorMode, GuardiaoConfig, ResponderMode};

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_PROVIDER: &str = "anthropic";
pub const DATABASE_FILE: &str = "guardiao.db";

/// News outlets and institutions the collector asks the model to draw from.
pub const DEFAULT_TRUSTED_SOURCES: &[&str] = &[
    "G1",
    "Folha de S.Paulo",
    "Estadão",
    "UOL",
    "CNN Brasil",
    "Agência Brasil",
    "Banco Central do Brasil",
    "FEBRABAN",
    "Procon-SP",
    "Serasa",
    "Valor Econômico",
    "Exame",
];

/// Runtime configuration, resolved once at startup and passed by reference
/// to every component.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub prompts_dir: Option<PathBuf>,
    pub llm: LlmSettings,
    pub search: Option<SearchSettings>,
    pub collector: CollectorSettings,
    pub responder: ResponderSettings,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: String,
    pub model: Option<String>,
    pub api_key: String,
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub api_key: String,
    pub engine_id: String,
    pub max_results: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CollectorSettings {
    pub mode: CollectorMode,
    pub year: i32,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ResponderSettings {
    pub mode: ResponderMode,
    pub sample_rows: usize,
    pub max_words: usize,
}

/// Command-line values that win over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub offline: bool,
}

impl AppConfig {
    pub fn resolve(file: &GuardiaoConfig, overrides: &ConfigOverrides) -> Result<Self, GuardiaoError> {
        let data_dir = overrides
            .data_dir
            .clone()
            .or_else(|| file.data_dir.clone())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let llm_file = file.llm.clone().unwrap_or_default();
        let provider = overrides
            .provider
            .clone()
            .or(llm_file.provider)
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let configured_key = overrides.api_key.clone().or(llm_file.api_key);
        let api_key = resolve_api_key(&provider, configured_key.as_deref());
        let llm = LlmSettings {
            model: overrides.model.clone().or(llm_file.model),
            base_url: overrides.base_url.clone().or(llm_file.base_url),
            timeout: Duration::from_secs(llm_file.timeout_secs.unwrap_or(60)),
            max_tokens: llm_file.max_tokens.unwrap_or(2048),
            provider,
            api_key,
        };

        let search = resolve_search(file);

        let collector_file = file.collector.clone().unwrap_or_default();
        let collector = CollectorSettings {
            mode: collector_file.mode.unwrap_or_default(),
            year: collector_file.year.unwrap_or_else(|| chrono::Local::now().year()),
            sources: collector_file
                .sources
                .unwrap_or_else(|| DEFAULT_TRUSTED_SOURCES.iter().map(|s| s.to_string()).collect()),
        };
        if collector.mode == CollectorMode::Search && search.is_none() {
            return Err(GuardiaoError::Config(
                "collector.mode 'search' requires search.api_key and search.engine_id (or GOOGLE_API_KEY and SEARCH_ENGINE_ID)".into(),
            ));
        }

        let responder_file = file.responder.clone().unwrap_or_default();
        let responder = ResponderSettings {
            mode: if overrides.offline {
                ResponderMode::Template
            } else {
                responder_file.mode.unwrap_or_default()
            },
            sample_rows: responder_file.sample_rows.unwrap_or(5),
            max_words: responder_file.max_words.unwrap_or(500),
        };

        let retry_file = file.retry.clone().unwrap_or_default();
        let retry = RetryConfig {
            max_retries: retry_file.max_retries.unwrap_or(1),
            base_delay: Duration::from_millis(retry_file.base_delay_ms.unwrap_or(1000)),
        };

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            prompts_dir: file.prompts_dir.as_ref().map(PathBuf::from),
            llm,
            search,
            collector,
            responder,
            retry,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    /// Whether any configured component needs the text-generation capability.
    pub fn needs_llm(&self) -> bool {
        self.collector.mode == CollectorMode::Llm || self.responder.mode == ResponderMode::Llm
    }
}

fn resolve_search(file: &GuardiaoConfig) -> Option<SearchSettings> {
    let search_file = file.search.clone().unwrap_or_default();
    let api_key = search_file
        .api_key
        .as_deref()
        .map(resolve_credential)
        .filter(|k| !k.is_empty() && !k.starts_with('$'))
        .or_else(|| std::env::var("GOOGLE_API_KEY").ok())?;
    let engine_id = search_file
        .engine_id
        .as_deref()
        .map(resolve_credential)
        .filter(|k| !k.is_empty() && !k.starts_with('$'))
        .or_else(|| std::env::var("SEARCH_ENGINE_ID").ok())?;
    Some(SearchSettings {
        api_key,
        engine_id,
        // The Custom Search API returns at most 10 items per request
        max_results: search_file.max_results.unwrap_or(10).clamp(1, 10),
        timeout: Duration::from_secs(search_file.timeout_secs.unwrap_or(30)),
    })
}
