use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use crate::api::AppState;
use crate::errors::GuardiaoError;
use crate::models::ChatHistory;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub question: String,
    pub session_id: Option<String>,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<Value>, GuardiaoError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(GuardiaoError::Config("question must not be empty".into()));
    }
    let session_id = req
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let answer = state.orchestrator.ask(question).await;

    let mut history = state.sessions.entry(session_id.clone()).or_insert_with(ChatHistory::new);
    history.push(question, &answer);
    let exchanges = history.len();
    drop(history);

    Ok(Json(json!({
        "session_id": session_id,
        "answer": answer,
        "exchanges": exchanges,
    })))
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.sessions.get(&session_id) {
        Some(history) => Ok(Json(json!({
            "session_id": session_id,
            "history": history.exchanges(),
        }))),
        None => Err((StatusCode::NOT_FOUND, Json(json!({"error": "Chat session not found"})))),
    }
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.sessions.remove(&session_id) {
        Some(_) => Ok(Json(json!({"deleted": true}))),
        None => Err((StatusCode::NOT_FOUND, Json(json!({"error": "Chat session not found"})))),
    }
}
