use crate::cli::{build_orchestrator, finish_progress, GlobalArgs};
use crate::errors::GuardiaoError;
use crate::repl::renderer;

pub async fn handle_run(global: &GlobalArgs, quiet: bool) -> Result<(), GuardiaoError> {
    let (orchestrator, progress) = build_orchestrator(global, quiet).await?;
    let run = orchestrator.run_pipeline().await;
    finish_progress(orchestrator, progress).await;

    println!(
        "{}",
        renderer::render_success(&format!("{} novos relatos coletados", run.new_reports.len()))
    );
    println!("{}", renderer::render_analysis(&run.analysis));
    Ok(())
}
