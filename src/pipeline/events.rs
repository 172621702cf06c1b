use serde::Serialize;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Collect,
    Aggregate,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Collect => "Coletando relatos de golpes",
            Self::Aggregate => "Agregando estatísticas",
        }
    }
}

/// Progress messages sent from the orchestrator to a terminal or other consumer.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    StageStarted {
        stage: Stage,
    },
    StageCompleted {
        stage: Stage,
        items: usize,
    },
    PipelineCompleted {
        new_reports: usize,
        total_reports: u64,
        duration_ms: u64,
    },
}
