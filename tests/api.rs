mod common;

use axum::body::Body;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use guardiao::api::{build_router, AppState};
use guardiao::db::Database;
use guardiao::pipeline::Aggregator;

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

fn seeded_state(offline: bool) -> AppState {
    let db = common::seeded_database();
    Aggregator::new(db.clone()).aggregate();
    AppState::new(common::orchestrator(&db, offline))
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = AppState::new(common::orchestrator(&Database::in_memory().unwrap(), true));
    let response = app(&state).oneshot(make_request("GET", "/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "guardiao");
}

#[tokio::test]
async fn test_analysis_endpoint_returns_stored_counts() {
    let state = seeded_state(true);
    let response = app(&state).oneshot(make_request("GET", "/api/analysis", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["has_data"], true);
    assert_eq!(body["total"], 6);
    assert_eq!(body["top_fraud_types"][0], json!({"fraud_type": "Phishing", "count": 5}));
}

#[tokio::test]
async fn test_analysis_endpoint_computes_on_first_access() {
    let state = AppState::new(common::orchestrator(&Database::in_memory().unwrap(), true));
    let response = app(&state).oneshot(make_request("GET", "/api/analysis", None)).await.unwrap();
    let body = response_json(response).await;

    // The scripted collector supplies two reports on the first read
    assert_eq!(body["total"], 2);
    assert_eq!(body["has_data"], true);
}

#[tokio::test]
async fn test_pipeline_run_endpoint() {
    let state = seeded_state(true);
    let response = app(&state)
        .oneshot(make_request("POST", "/api/pipeline/run", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["new_reports"], 2);
    assert_eq!(body["total_reports"], 8);
    assert_eq!(body["reports"][0]["Tipo do golpe"], "Phishing");
    assert_eq!(body["reports"][1]["Canal utilizado"], "WhatsApp");
}

#[tokio::test]
async fn test_chat_answers_with_counts_and_keeps_history() {
    let state = seeded_state(true);

    let response = app(&state)
        .oneshot(make_request("POST", "/api/chat", Some(json!({"question": "Como evitar phishing?"}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let answer = body["answer"].as_str().unwrap();
    assert!(answer.contains("Phishing"));
    assert!(answer.contains('5'));
    assert_eq!(body["exchanges"], 1);

    let session_id = body["session_id"].as_str().unwrap().to_string();
    let response = app(&state)
        .oneshot(make_request(
            "POST",
            "/api/chat",
            Some(json!({"question": "E o golpe do Pix?", "session_id": session_id})),
        ))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["exchanges"], 2);

    let response = app(&state)
        .oneshot(make_request("GET", &format!("/api/chat/{}/history", session_id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["history"].as_array().unwrap().len(), 2);
    assert_eq!(body["history"][0]["user"], "Como evitar phishing?");
}

#[tokio::test]
async fn test_chat_uses_llm_answer_when_online() {
    let state = seeded_state(false);
    let response = app(&state)
        .oneshot(make_request("POST", "/api/chat", Some(json!({"question": "O que é phishing?"}))))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert!(body["answer"].as_str().unwrap().contains("Desconfie de mensagens urgentes"));
}

#[tokio::test]
async fn test_chat_rejects_empty_question() {
    let state = seeded_state(true);
    let response = app(&state)
        .oneshot(make_request("POST", "/api/chat", Some(json!({"question": "   "}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error_type"], "ConfigError");
}

#[tokio::test]
async fn test_delete_chat_session() {
    let state = seeded_state(true);
    let response = app(&state)
        .oneshot(make_request("POST", "/api/chat", Some(json!({"question": "Como evitar phishing?"}))))
        .await
        .unwrap();
    let session_id = response_json(response).await["session_id"].as_str().unwrap().to_string();

    let uri = format!("/api/chat/{}", session_id);
    let response = app(&state).oneshot(make_request("DELETE", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["deleted"], true);

    let response = app(&state).oneshot(make_request("DELETE", &uri, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_unknown_session() {
    let state = seeded_state(true);
    let response = app(&state)
        .oneshot(make_request("GET", "/api/chat/desconhecida/history", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
