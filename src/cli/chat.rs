use std::sync::Arc;

use crate::cli::commands::ChatArgs;
use crate::cli::{build_orchestrator, GlobalArgs};
use crate::errors::GuardiaoError;
use crate::repl::ReplSession;

pub async fn handle_chat(args: ChatArgs, global: &GlobalArgs) -> Result<(), GuardiaoError> {
    let (orchestrator, _progress) = build_orchestrator(global, false).await?;
    let mut session = ReplSession::new(Arc::new(orchestrator));
    if args.no_splash {
        session = session.without_splash();
    }
    session.run().await
}
