use axum::{extract::State, Json};
use serde_json::{json, Value};
use crate::api::AppState;

pub async fn get_analysis(State(state): State<AppState>) -> Json<Value> {
    let analysis = state.orchestrator.current_analysis().await;
    let top: Vec<Value> = analysis
        .top_fraud_types(5)
        .into_iter()
        .map(|(fraud_type, count)| json!({"fraud_type": fraud_type, "count": count}))
        .collect();
    Json(json!({
        "has_data": !analysis.has_no_data(),
        "total": analysis.total(),
        "top_fraud_types": top,
        "analysis": analysis,
    }))
}
