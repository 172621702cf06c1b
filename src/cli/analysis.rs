use crate::cli::commands::AnalysisArgs;
use crate::cli::{build_orchestrator, finish_progress, GlobalArgs};
use crate::errors::GuardiaoError;
use crate::repl::renderer;

pub async fn handle_analysis(args: AnalysisArgs, global: &GlobalArgs, quiet: bool) -> Result<(), GuardiaoError> {
    // JSON output stays machine-readable: no spinner
    let (orchestrator, progress) = build_orchestrator(global, quiet || args.json).await?;
    let analysis = orchestrator.current_analysis().await;
    finish_progress(orchestrator, progress).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", renderer::render_analysis(&analysis));
    }
    Ok(())
}
