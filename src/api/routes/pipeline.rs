use axum::{extract::State, Json};
use serde_json::{json, Value};
use crate::api::AppState;

pub async fn run_pipeline(State(state): State<AppState>) -> Json<Value> {
    let run = state.orchestrator.run_pipeline().await;
    Json(json!({
        "new_reports": run.new_reports.len(),
        "total_reports": run.analysis.total(),
        "duration_ms": run.duration_ms,
        "reports": run.new_reports,
        "analysis": run.analysis,
    }))
}
