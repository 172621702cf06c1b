pub mod analysis;
pub mod ask;
pub mod chat;
pub mod commands;
pub mod run;
pub mod serve;

pub use commands::{Cli, Commands, GlobalArgs};

use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::{self, AppConfig};
use crate::errors::GuardiaoError;
use crate::pipeline::Orchestrator;
use crate::repl::spawn_progress;

/// Load the configuration file (explicit, `guardiao.yaml`, or defaults) and
/// apply command-line overrides.
pub async fn load_app_config(global: &GlobalArgs) -> Result<AppConfig, GuardiaoError> {
    let path = global.config.as_ref().map(PathBuf::from);
    let file = config::load_config(path.as_deref()).await?;
    AppConfig::resolve(&file, &global.overrides())
}

/// Build the orchestrator, with a terminal spinner attached unless `quiet`.
/// The spinner task ends once the orchestrator is dropped.
pub async fn build_orchestrator(
    global: &GlobalArgs,
    quiet: bool,
) -> Result<(Orchestrator, Option<JoinHandle<()>>), GuardiaoError> {
    let config = load_app_config(global).await?;
    let orchestrator = Orchestrator::new(&config)?;
    if quiet {
        return Ok((orchestrator, None));
    }
    let (tx, rx) = mpsc::unbounded_channel();
    Ok((orchestrator.with_event_channel(tx), Some(spawn_progress(rx))))
}

/// Drop the orchestrator and wait for its spinner to print its last line.
pub async fn finish_progress(orchestrator: Orchestrator, progress: Option<JoinHandle<()>>) {
    drop(orchestrator);
    if let Some(handle) = progress {
        let _ = handle.await;
    }
}
