use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::GuardiaoError;

impl IntoResponse for GuardiaoError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            GuardiaoError::Config(_) => StatusCode::BAD_REQUEST,
            GuardiaoError::Authentication(_) => StatusCode::UNAUTHORIZED,
            GuardiaoError::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            GuardiaoError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            GuardiaoError::LlmApi(_)
            | GuardiaoError::Network(_)
            | GuardiaoError::Search(_)
            | GuardiaoError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_type = self.classify().error_type;
        (status, Json(json!({"error": self.to_string(), "error_type": error_type}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(GuardiaoError::Config("x".into()).into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(GuardiaoError::Timeout("x".into()).into_response().status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            GuardiaoError::Database("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
