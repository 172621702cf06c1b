use std::sync::Arc;
use std::time::Instant;
use serde::Serialize;
use tokio::sync::{mpsc, Mutex, MutexGuard};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::db::Database;
use crate::errors::GuardiaoError;
use crate::llm::{self, RetryingGenerator, TextGenerator};
use crate::models::{AggregatedAnalysis, FraudReport};
use crate::prompts::PromptLoader;
use crate::search::{GoogleSearch, WebSearch};
use super::aggregator::Aggregator;
use super::collector::Collector;
use super::events::{PipelineEvent, Stage};
use super::responder::Responder;

/// Outcome of one collect + aggregate run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub new_reports: Vec<FraudReport>,
    pub analysis: AggregatedAnalysis,
    pub duration_ms: u64,
}

/// Wires collector, aggregator and responder over one database and exposes
/// the operations the presentation surfaces use.
pub struct Orchestrator {
    db: Database,
    collector: Collector,
    aggregator: Aggregator,
    responder: Responder,
    run_lock: Mutex<()>,
    event_tx: Option<mpsc::UnboundedSender<PipelineEvent>>,
}

impl Orchestrator {
    /// Open the database under `config.data_dir` and build the external
    /// capabilities the configured modes need.
    pub fn new(config: &AppConfig) -> Result<Self, GuardiaoError> {
        let db = Database::new(&config.database_path())?;

        let llm: Option<Arc<dyn TextGenerator>> = if config.needs_llm() {
            let provider = llm::create_provider(&config.llm)?;
            info!(provider = provider.provider_name(), model = provider.model_name(), "LLM provider ready");
            Some(Arc::new(RetryingGenerator::new(provider, config.retry.clone())))
        } else {
            None
        };

        let search: Option<Arc<dyn WebSearch>> = match &config.search {
            Some(settings) => Some(Arc::new(GoogleSearch::new(settings, config.retry.clone())?)),
            None => None,
        };

        Ok(Self::with_components(config, db, llm, search))
    }

    /// Build from already-constructed capabilities.
    pub fn with_components(
        config: &AppConfig,
        db: Database,
        llm: Option<Arc<dyn TextGenerator>>,
        search: Option<Arc<dyn WebSearch>>,
    ) -> Self {
        let prompts = Arc::new(PromptLoader::new(config.prompts_dir.clone()));
        let search_results = config.search.as_ref().map(|s| s.max_results).unwrap_or(10);
        Self {
            collector: Collector::new(
                db.clone(),
                llm.clone(),
                search.clone(),
                config.collector.clone(),
                search_results,
                prompts.clone(),
            ),
            aggregator: Aggregator::new(db.clone()),
            responder: Responder::new(db.clone(), llm, search, config.responder.clone(), prompts),
            db,
            run_lock: Mutex::new(()),
            event_tx: None,
        }
    }

    /// Attach an event channel for streaming progress to a terminal or other consumer.
    pub fn with_event_channel(mut self, tx: mpsc::UnboundedSender<PipelineEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn emit(&self, event: PipelineEvent) {
        if let Some(ref tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    /// Collect new reports dated today, then recompute the analysis.
    pub async fn run_pipeline(&self) -> PipelineRun {
        let guard = self.run_lock.lock().await;
        self.run_locked(guard).await
    }

    async fn run_locked(&self, _guard: MutexGuard<'_, ()>) -> PipelineRun {
        let started = Instant::now();
        let date_hint = chrono::Local::now().format("%Y-%m-%d").to_string();
        info!(date_hint = %date_hint, "Pipeline started");

        self.emit(PipelineEvent::StageStarted { stage: Stage::Collect });
        let new_reports = self.collector.collect(&date_hint).await;
        self.emit(PipelineEvent::StageCompleted { stage: Stage::Collect, items: new_reports.len() });

        self.emit(PipelineEvent::StageStarted { stage: Stage::Aggregate });
        let analysis = self.aggregator.aggregate();
        self.emit(PipelineEvent::StageCompleted { stage: Stage::Aggregate, items: analysis.flatten().len() });

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(new_reports = new_reports.len(), total = analysis.total(), duration_ms, "Pipeline completed");
        self.emit(PipelineEvent::PipelineCompleted {
            new_reports: new_reports.len(),
            total_reports: analysis.total(),
            duration_ms,
        });

        PipelineRun { new_reports, analysis, duration_ms }
    }

    /// The stored analysis. Runs the pipeline when nothing is stored yet or
    /// the stored table cannot be read. Concurrent first reads run it once.
    pub async fn current_analysis(&self) -> AggregatedAnalysis {
        if let Ok(Some(analysis)) = self.db.load_analysis() {
            return analysis;
        }

        let guard = self.run_lock.lock().await;
        // Another caller may have computed it while we waited
        match self.db.load_analysis() {
            Ok(Some(analysis)) => analysis,
            Ok(None) => {
                info!("No stored analysis, running pipeline");
                self.run_locked(guard).await.analysis
            }
            Err(e) => {
                warn!(error = %e, "Stored analysis unreadable, running pipeline");
                self.run_locked(guard).await.analysis
            }
        }
    }

    pub async fn respond(&self, question: &str, analysis: &AggregatedAnalysis) -> String {
        info!(question, "Processing question");
        self.responder.respond(question, analysis).await
    }

    /// Answer against the current analysis.
    pub async fn ask(&self, question: &str) -> String {
        let analysis = self.current_analysis().await;
        self.respond(question, &analysis).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use crate::config::{ConfigOverrides, GuardiaoConfig};
    use crate::llm::LLMResponse;

    struct CountingGenerator {
        calls: Arc<AtomicU32>,
        reply: String,
    }

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn complete(&self, _prompt: &str, _system: Option<&str>) -> Result<LLMResponse, GuardiaoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Let a concurrent caller reach the run lock mid-generation
            tokio::task::yield_now().await;
            Ok(LLMResponse::text(self.reply.clone(), "counting"))
        }
        fn provider_name(&self) -> &str { "counting" }
        fn model_name(&self) -> &str { "counting" }
    }

    fn orchestrator(reply: &str) -> (Orchestrator, Arc<AtomicU32>) {
        let config = AppConfig::resolve(&GuardiaoConfig::default(), &ConfigOverrides::default()).unwrap();
        let calls = Arc::new(AtomicU32::new(0));
        let llm = CountingGenerator { calls: calls.clone(), reply: reply.to_string() };
        let orch = Orchestrator::with_components(&config, Database::in_memory().unwrap(), Some(Arc::new(llm)), None);
        (orch, calls)
    }

    #[tokio::test]
    async fn test_run_pipeline_emits_stage_events() {
        let (orch, _) = orchestrator(r#"[{"Fonte": "G1", "Data da notícia": "2025-03-01", "Tipo do golpe": "Phishing"}]"#);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let orch = orch.with_event_channel(tx);

        let run = orch.run_pipeline().await;
        assert_eq!(run.new_reports.len(), 1);
        assert_eq!(run.analysis.total(), 1);

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert!(matches!(events.first(), Some(PipelineEvent::StageStarted { stage: Stage::Collect })));
        assert!(matches!(
            events.last(),
            Some(PipelineEvent::PipelineCompleted { new_reports: 1, total_reports: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_current_analysis_computes_once() {
        let (orch, calls) = orchestrator("Nada encontrado.");
        let first = orch.current_analysis().await;
        assert!(first.has_no_data());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Stored now: the second read does not collect again
        let second = orch.current_analysis().await;
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_reads_collect_once() {
        let (orch, calls) = orchestrator("Nada encontrado.");
        let (a, b) = tokio::join!(orch.current_analysis(), orch.current_analysis());
        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
