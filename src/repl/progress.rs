use std::time::Duration;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use crate::pipeline::{PipelineEvent, Stage};
use crate::utils::formatting::format_duration;

/// Spinner that follows the pipeline through its stages.
pub struct PipelineProgress {
    spinner: Option<ProgressBar>,
}

impl PipelineProgress {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    fn start_spinner(&mut self) -> &ProgressBar {
        self.spinner.get_or_insert_with(|| {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.green} {msg} {elapsed:.dim}") {
                bar.set_style(style);
            }
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        })
    }

    /// Handle a pipeline event and update the spinner accordingly.
    pub fn handle_event(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::StageStarted { stage } => {
                self.start_spinner().set_message(format!("{}...", stage.display_name()));
            }
            PipelineEvent::StageCompleted { stage: Stage::Collect, items } => {
                if let Some(bar) = &self.spinner {
                    bar.println(format!("  \u{2714} {} novos relatos", items));
                }
            }
            PipelineEvent::StageCompleted { .. } => {}
            PipelineEvent::PipelineCompleted { total_reports, duration_ms, .. } => {
                if let Some(bar) = self.spinner.take() {
                    bar.finish_and_clear();
                }
                println!(
                    "  \u{2714} Estatísticas atualizadas: {} relatos ({})",
                    total_reports,
                    format_duration(*duration_ms)
                );
            }
        }
    }
}

impl Default for PipelineProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Render events from `rx` until the sending side is dropped.
pub fn spawn_progress(mut rx: mpsc::UnboundedReceiver<PipelineEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut progress = PipelineProgress::new();
        while let Some(event) = rx.recv().await {
            progress.handle_event(&event);
        }
    })
}
