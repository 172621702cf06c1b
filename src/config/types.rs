use serde::{Deserialize, Serialize};

/// Contents of the YAML configuration file. Every field is optional; the
/// resolved values used at runtime live in [`super::AppConfig`].
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GuardiaoConfig {
    pub data_dir: Option<String>,
    /// Directory whose `<name>.txt` files override the built-in prompts.
    pub prompts_dir: Option<String>,
    pub llm: Option<LLMConfig>,
    pub search: Option<SearchConfig>,
    pub collector: Option<CollectorConfig>,
    pub responder: Option<ResponderConfig>,
    pub retry: Option<RetrySettings>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LLMConfig {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub engine_id: Option<String>,
    pub max_results: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CollectorConfig {
    pub mode: Option<CollectorMode>,
    pub year: Option<i32>,
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ResponderConfig {
    pub mode: Option<ResponderMode>,
    pub sample_rows: Option<usize>,
    pub max_words: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RetrySettings {
    pub max_retries: Option<u32>,
    pub base_delay_ms: Option<u64>,
}

/// Where the collector gets its raw reports from.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollectorMode {
    /// Ask the text-generation capability for a JSON array of reports
    #[default]
    Llm,
    /// Turn web-search hits into reports
    Search,
}

/// How the responder produces answers.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponderMode {
    #[default]
    Llm,
    /// Fixed Markdown templates, no generation capability involved
    Template,
}

impl CollectorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Search => "search",
        }
    }
}

impl ResponderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Llm => "llm",
            Self::Template => "template",
        }
    }
}

impl std::fmt::Display for CollectorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for ResponderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
