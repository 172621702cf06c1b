#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use guardiao::config::{AppConfig, ConfigOverrides, GuardiaoConfig};
use guardiao::db::Database;
use guardiao::errors::GuardiaoError;
use guardiao::llm::{LLMResponse, TextGenerator};
use guardiao::models::FraudReport;
use guardiao::pipeline::Orchestrator;

pub const COLLECTED_REPORTS: &str = r#"Segue a lista:
```json
[
  {"Fonte": "G1", "Data da notícia": "2025-03-01", "Tipo do golpe": "phishing bancário", "Canal utilizado": "e-mail", "Público alvo": "idosos"},
  {"Fonte": "Febraban", "Data da notícia": "2025-03-02", "Tipo do golpe": "Golpe do Pix", "Canal utilizado": "WhatsApp"}
]
```"#;

/// Answers collector prompts with two reports and anything else with a fixed text.
pub struct ScriptedGenerator;

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, prompt: &str, _system: Option<&str>) -> Result<LLMResponse, GuardiaoError> {
        let content = if prompt.contains("array JSON") {
            COLLECTED_REPORTS.to_string()
        } else {
            "Desconfie de mensagens urgentes e nunca clique em links desconhecidos.".to_string()
        };
        Ok(LLMResponse::text(content, "scripted"))
    }
    fn provider_name(&self) -> &str { "scripted" }
    fn model_name(&self) -> &str { "scripted" }
}

pub fn config(offline: bool) -> AppConfig {
    let overrides = ConfigOverrides { offline, ..Default::default() };
    AppConfig::resolve(&GuardiaoConfig::default(), &overrides).unwrap()
}

pub fn orchestrator(db: &Database, offline: bool) -> Orchestrator {
    Orchestrator::with_components(&config(offline), db.clone(), Some(Arc::new(ScriptedGenerator)), None)
}

pub fn report(source: &str, date: &str, fraud_type: &str) -> FraudReport {
    FraudReport {
        source: source.into(),
        report_date: date.into(),
        fraud_type: fraud_type.into(),
        description: "Relato de teste".into(),
        channel: "WhatsApp".into(),
        target_audience: "Idosos".into(),
        impact_estimate: "Não informado".into(),
    }
}

/// Five phishing reports and one Pix report, on distinct keys.
pub fn seeded_database() -> Database {
    let db = Database::in_memory().unwrap();
    let mut reports: Vec<FraudReport> = (1..=5)
        .map(|day| report("G1", &format!("2025-01-0{}", day), "Phishing"))
        .collect();
    reports.push(report("UOL", "2025-02-10", "Golpe do Pix"));
    db.merge_reports(&reports).unwrap();
    db
}
