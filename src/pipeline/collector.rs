use std::sync::{Arc, LazyLock};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::{CollectorMode, CollectorSettings};
use crate::db::Database;
use crate::errors::GuardiaoError;
use crate::llm::TextGenerator;
use crate::models::FraudReport;
use crate::models::report::*;
use crate::normalizer::{self, rules, GENERAL_POPULATION, NOT_INFORMED, OTHER};
use crate::prompts::{PromptLoader, PromptVariables};
use crate::search::{SearchItem, WebSearch};
use crate::utils::truncation::{truncate_error, truncate_for_log};

static CITATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("citation marker pattern is valid"));

/// Gathers raw fraud reports, normalizes them and appends them to the report table.
pub struct Collector {
    db: Database,
    llm: Option<Arc<dyn TextGenerator>>,
    search: Option<Arc<dyn WebSearch>>,
    settings: CollectorSettings,
    search_results: u32,
    prompts: Arc<PromptLoader>,
}

impl Collector {
    pub fn new(
        db: Database,
        llm: Option<Arc<dyn TextGenerator>>,
        search: Option<Arc<dyn WebSearch>>,
        settings: CollectorSettings,
        search_results: u32,
        prompts: Arc<PromptLoader>,
    ) -> Self {
        Self { db, llm, search, settings, search_results, prompts }
    }

    /// Collect, normalize and persist new reports. Any failure along the way
    /// is logged and yields an empty result.
    pub async fn collect(&self, date_hint: &str) -> Vec<FraudReport> {
        match self.try_collect(date_hint).await {
            Ok(reports) => reports,
            Err(e) => {
                warn!(
                    mode = %self.settings.mode,
                    date_hint,
                    error = %truncate_error(&e.to_string()),
                    "Collection failed, no reports gathered"
                );
                Vec::new()
            }
        }
    }

    async fn try_collect(&self, date_hint: &str) -> Result<Vec<FraudReport>, GuardiaoError> {
        let reports = match self.settings.mode {
            CollectorMode::Llm => self.collect_from_llm(date_hint).await?,
            CollectorMode::Search => self.collect_from_search(date_hint).await?,
        };
        if reports.is_empty() {
            info!("No reports collected");
            return Ok(reports);
        }

        let stored = self.db.merge_reports(&reports)?;
        info!(new_reports = reports.len(), stored, "Reports collected");
        Ok(reports)
    }

    async fn collect_from_llm(&self, date_hint: &str) -> Result<Vec<FraudReport>, GuardiaoError> {
        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| GuardiaoError::Config("collector.mode 'llm' requires an LLM provider".into()))?;

        let prompt = self.prompts.render("collector", &self.prompt_variables(date_hint))?;
        let response = llm.complete(&prompt, None).await?;
        debug!(
            provider = llm.provider_name(),
            reply = %truncate_for_log(&response.content),
            "Collector reply received"
        );
        parse_reports(&response.content, date_hint)
    }

    async fn collect_from_search(&self, date_hint: &str) -> Result<Vec<FraudReport>, GuardiaoError> {
        let search = self
            .search
            .as_ref()
            .ok_or_else(|| GuardiaoError::Config("collector.mode 'search' requires search credentials".into()))?;

        let query = format!("Golpes financeiros Brasil {}", self.settings.year);
        let items = search.search(&query, self.search_results).await?;
        debug!(query = %query, results = items.len(), "Search results received");
        Ok(items.iter().map(|item| report_from_search_item(item, date_hint)).collect())
    }

    fn prompt_variables(&self, date_hint: &str) -> PromptVariables {
        let with_other = |rules: &[rules::Rule]| {
            let mut labels = rules::labels(rules);
            labels.push(OTHER);
            labels.iter().map(|l| format!("\"{}\"", l)).collect::<Vec<_>>().join(", ")
        };
        PromptVariables {
            year: self.settings.year.to_string(),
            date: date_hint.to_string(),
            sources: self
                .settings
                .sources
                .iter()
                .map(|s| format!("- {}", s))
                .collect::<Vec<_>>()
                .join("\n"),
            fraud_types: with_other(rules::FRAUD_TYPE_RULES),
            channels: with_other(rules::CHANNEL_RULES),
            audiences: with_other(rules::AUDIENCE_RULES),
            ..Default::default()
        }
    }
}

/// The substring from the first `[` to the last `]`, if any.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

/// Parse a model reply into normalized reports.
pub fn parse_reports(reply: &str, date_hint: &str) -> Result<Vec<FraudReport>, GuardiaoError> {
    let candidate = extract_json_array(reply)
        .ok_or_else(|| GuardiaoError::MalformedResponse("no JSON array in reply".into()))?;
    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| GuardiaoError::MalformedResponse(format!("invalid JSON array: {}", e)))?;
    let items = value
        .as_array()
        .ok_or_else(|| GuardiaoError::MalformedResponse("reply JSON is not an array".into()))?;

    let mut reports = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_object() {
            Some(obj) => reports.push(report_from_object(obj, date_hint)),
            None => warn!(index, "Skipping non-object element in collector reply"),
        }
    }
    Ok(reports)
}

fn field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match obj.get(key)? {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn report_from_object(obj: &Map<String, Value>, date_hint: &str) -> FraudReport {
    let source = field(obj, COL_SOURCE)
        .map(|s| CITATION_MARKER.replace_all(&s, "").trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            warn!("Report without a source, labelling it as not informed");
            NOT_INFORMED.to_string()
        });
    let fraud_type = field(obj, COL_FRAUD_TYPE).unwrap_or_else(|| OTHER.to_string());
    let channel = field(obj, COL_CHANNEL).unwrap_or_else(|| OTHER.to_string());
    let audience = field(obj, COL_TARGET_AUDIENCE).unwrap_or_else(|| GENERAL_POPULATION.to_string());

    FraudReport {
        source,
        report_date: field(obj, COL_REPORT_DATE).unwrap_or_else(|| date_hint.to_string()),
        fraud_type: normalizer::normalize_fraud_type(&fraud_type).to_string(),
        description: field(obj, COL_DESCRIPTION).unwrap_or_default(),
        channel: normalizer::normalize_channel(&channel).to_string(),
        target_audience: normalizer::normalize_audience(&audience).to_string(),
        impact_estimate: field(obj, COL_IMPACT_ESTIMATE).unwrap_or_else(|| NOT_INFORMED.to_string()),
    }
}

fn report_from_search_item(item: &SearchItem, date_hint: &str) -> FraudReport {
    FraudReport {
        source: item.link.clone(),
        report_date: date_hint.to_string(),
        fraud_type: normalizer::normalize_fraud_type(&item.title).to_string(),
        description: item.snippet.clone(),
        channel: normalizer::normalize_channel("Internet").to_string(),
        target_audience: GENERAL_POPULATION.to_string(),
        impact_estimate: NOT_INFORMED.to_string(),
    }
}
