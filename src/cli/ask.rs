use crate::cli::commands::{AskArgs, InformativoArgs};
use crate::cli::{build_orchestrator, finish_progress, GlobalArgs};
use crate::errors::GuardiaoError;
use crate::repl::renderer;

pub async fn handle_ask(args: AskArgs, global: &GlobalArgs, quiet: bool) -> Result<(), GuardiaoError> {
    let question = args.question();
    if question.trim().is_empty() {
        return Err(GuardiaoError::Config("Question must not be empty".into()));
    }

    let (orchestrator, progress) = build_orchestrator(global, quiet).await?;
    let answer = orchestrator.ask(&question).await;
    finish_progress(orchestrator, progress).await;

    println!("{}", answer.trim_end());
    Ok(())
}

/// The question asked for each fraud type in the prevention bulletin.
pub fn prevention_question(fraud_type: &str) -> String {
    format!("Como se prevenir de {}?", fraud_type)
}

/// One answer per top fraud type, with its current count.
pub async fn handle_informativo(args: InformativoArgs, global: &GlobalArgs, quiet: bool) -> Result<(), GuardiaoError> {
    let (orchestrator, progress) = build_orchestrator(global, quiet).await?;
    let analysis = orchestrator.current_analysis().await;

    let top: Vec<(String, u64)> = analysis
        .top_fraud_types(args.top)
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    if top.is_empty() {
        finish_progress(orchestrator, progress).await;
        println!("{}", renderer::render_analysis(&analysis));
        return Ok(());
    }

    let mut sections = Vec::with_capacity(top.len());
    for (fraud_type, count) in &top {
        let answer = orchestrator.respond(&prevention_question(fraud_type), &analysis).await;
        sections.push(format!("## {} ({} casos)\n\n{}\n", fraud_type, count, answer.trim_end()));
    }
    finish_progress(orchestrator, progress).await;

    println!("# Informativo: golpes mais frequentes\n");
    println!("{}", sections.join("\n"));
    Ok(())
}
