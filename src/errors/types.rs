use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardiaoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("LLM API error: {0}")]
    LlmApi(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Billing/quota error: {0}")]
    Billing(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Search API error: {0}")]
    Search(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for GuardiaoError {
    fn from(e: rusqlite::Error) -> Self {
        GuardiaoError::Database(e.to_string())
    }
}

impl From<reqwest::Error> for GuardiaoError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GuardiaoError::Timeout(e.to_string())
        } else {
            GuardiaoError::Network(e.to_string())
        }
    }
}
