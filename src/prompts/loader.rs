use std::path::PathBuf;
use crate::errors::GuardiaoError;
use tracing::debug;

const BUILTIN_PROMPTS: &[(&str, &str)] = &[
    ("collector", include_str!("../../prompts/collector.txt")),
    ("responder", include_str!("../../prompts/responder.txt")),
];

/// Variables available for template interpolation in prompt files.
#[derive(Debug, Clone, Default)]
pub struct PromptVariables {
    pub year: String,
    pub date: String,
    pub sources: String,
    pub fraud_types: String,
    pub channels: String,
    pub audiences: String,
    pub question: String,
    pub top_fraud_types: String,
    pub matched_fraud_type: Option<String>,
    pub sample_rows: String,
    pub max_words: String,
}

impl PromptVariables {
    /// Value for a placeholder name, without the braces.
    fn value(&self, name: &str) -> Option<&str> {
        let value = match name {
            "YEAR" => &self.year,
            "DATE" => &self.date,
            "SOURCES" => &self.sources,
            "FRAUD_TYPES" => &self.fraud_types,
            "CHANNELS" => &self.channels,
            "AUDIENCES" => &self.audiences,
            "QUESTION" => &self.question,
            "TOP_FRAUD_TYPES" => &self.top_fraud_types,
            "MATCHED_FRAUD_TYPE" => return Some(self.matched_fraud_type.as_deref().unwrap_or("")),
            "SAMPLE_ROWS" => &self.sample_rows,
            "MAX_WORDS" => &self.max_words,
            _ => return None,
        };
        Some(value)
    }
}

/// Loads prompt templates, preferring `<name>.txt` from an override directory
/// over the templates compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct PromptLoader {
    prompts_dir: Option<PathBuf>,
}

impl PromptLoader {
    pub fn new(prompts_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = &prompts_dir {
            debug!(dir = %dir.display(), "PromptLoader using override directory");
        }
        Self { prompts_dir }
    }

    /// Load a prompt template by name (without .txt extension).
    pub fn load(&self, prompt_name: &str) -> Result<String, GuardiaoError> {
        if let Some(dir) = &self.prompts_dir {
            let file_path = dir.join(format!("{}.txt", prompt_name));
            if file_path.exists() {
                return std::fs::read_to_string(&file_path).map_err(|e| {
                    GuardiaoError::Config(format!("Failed to read prompt {}: {}", file_path.display(), e))
                });
            }
        }
        BUILTIN_PROMPTS
            .iter()
            .find(|(name, _)| *name == prompt_name)
            .map(|(_, body)| body.to_string())
            .ok_or_else(|| GuardiaoError::Config(format!("Unknown prompt: {}", prompt_name)))
    }

    /// Replace {{VARIABLE}} placeholders with values from PromptVariables in
    /// a single pass over the template; substituted text is never rescanned.
    /// None values become empty string, unknown placeholders are kept.
    pub fn interpolate(&self, template: &str, vars: &PromptVariables) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find("{{") {
            result.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                result.push_str(&rest[open..]);
                return result;
            };
            let name = &after[..close];
            match vars.value(name) {
                Some(value) => result.push_str(value),
                None => result.push_str(&rest[open..open + 2 + close + 2]),
            }
            rest = &after[close + 2..];
        }
        result.push_str(rest);
        result
    }

    /// Load and interpolate in one step.
    pub fn render(&self, prompt_name: &str, vars: &PromptVariables) -> Result<String, GuardiaoError> {
        Ok(self.interpolate(&self.load(prompt_name)?, vars))
    }
}
