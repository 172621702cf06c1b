pub mod routes;
pub mod errors;
pub mod auth;

use std::sync::Arc;
use axum::{middleware, routing::{get, post}, Router};
use dashmap::DashMap;
use tower_http::trace::TraceLayer;
use crate::models::ChatHistory;
use crate::pipeline::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    /// Conversation history per chat session id.
    pub sessions: Arc<DashMap<String, ChatHistory>>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            sessions: Arc::new(DashMap::new()),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/pipeline/run", post(routes::pipeline::run_pipeline))
        .route("/api/analysis", get(routes::analysis::get_analysis))
        .route("/api/chat", post(routes::chat::ask))
        .route(
            "/api/chat/:session_id",
            axum::routing::delete(routes::chat::delete_session),
        )
        .route("/api/chat/:session_id/history", get(routes::chat::get_history))
        .layer(middleware::from_fn(auth::api_auth_middleware));

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
