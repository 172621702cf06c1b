use crate::api::{self, AppState};
use crate::cli::commands::ServeArgs;
use crate::cli::{load_app_config, GlobalArgs};
use crate::errors::GuardiaoError;
use crate::pipeline::Orchestrator;
use tracing::info;

pub async fn handle_serve(args: ServeArgs, global: &GlobalArgs) -> Result<(), GuardiaoError> {
    info!(host = %args.host, port = args.port, "Starting API server");

    let config = load_app_config(global).await?;
    let state = AppState::new(Orchestrator::new(&config)?);
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| GuardiaoError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
