use std::path::Path;
use crate::errors::GuardiaoError;
use super::types::{CollectorMode, GuardiaoConfig};
use super::schema::CONFIG_SCHEMA;
use tracing::{debug, warn};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "guardiao.yaml";

pub async fn parse_config(path: &Path) -> Result<GuardiaoConfig, GuardiaoError> {
    if !path.exists() {
        return Err(GuardiaoError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(GuardiaoError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse configuration text. An empty document is an empty configuration.
pub fn parse_config_str(content: &str) -> Result<GuardiaoConfig, GuardiaoError> {
    if content.trim().is_empty() {
        return Ok(GuardiaoConfig::default());
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_schema(&yaml)?;

    let config: GuardiaoConfig = serde_yaml::from_value(yaml)?;

    validate_conflicts(&config)?;

    Ok(config)
}

/// Load the explicitly requested file, or `guardiao.yaml` when present, or
/// fall back to an all-defaults configuration.
pub async fn load_config(explicit: Option<&Path>) -> Result<GuardiaoConfig, GuardiaoError> {
    match explicit {
        Some(path) => parse_config(path).await,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                parse_config(default_path).await
            } else {
                debug!("No configuration file found, using defaults");
                Ok(GuardiaoConfig::default())
            }
        }
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), GuardiaoError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| GuardiaoError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| GuardiaoError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        // Advisory: typed deserialization below is the hard gate
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &GuardiaoConfig) -> Result<(), GuardiaoError> {
    if let Some(collector) = &config.collector {
        if let Some(sources) = &collector.sources {
            if sources.iter().all(|s| s.trim().is_empty()) {
                return Err(GuardiaoError::Config(
                    "collector.sources is set but lists no source names".into(),
                ));
            }
        }
        if collector.mode == Some(CollectorMode::Search) && config.search.is_none() {
            warn!("collector.mode is 'search' but no search section; relying on GOOGLE_API_KEY/SEARCH_ENGINE_ID");
        }
    }

    if let Some(search) = &config.search {
        if search.max_results == Some(0) {
            return Err(GuardiaoError::Config("search.max_results must be at least 1".into()));
        }
    }

    if let Some(dir) = &config.data_dir {
        if dir.trim().is_empty() {
            return Err(GuardiaoError::Config("data_dir must not be empty".into()));
        }
    }

    Ok(())
}
