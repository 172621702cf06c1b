use super::types::GuardiaoError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl GuardiaoError {
    /// Classify this error to decide whether an external call is worth repeating.
    pub fn classify(&self) -> ErrorClassification {
        let (error_type, retryable) = match self {
            // Transient failures of the generation or search capability
            GuardiaoError::RateLimit(_) => ("RateLimitError", true),
            GuardiaoError::Network(_) => ("NetworkError", true),
            GuardiaoError::Timeout(_) => ("TimeoutError", true),
            GuardiaoError::LlmApi(_) => ("LlmApiError", true),
            GuardiaoError::Search(_) => ("SearchError", true),

            // A reply that could not be parsed will not parse better the second time
            GuardiaoError::MalformedResponse(_) => ("MalformedResponseError", false),
            GuardiaoError::Billing(_) => ("BillingError", false),
            GuardiaoError::Authentication(_) => ("AuthenticationError", false),
            GuardiaoError::Config(_) => ("ConfigError", false),
            GuardiaoError::Json(_) => ("JsonError", false),
            GuardiaoError::Yaml(_) => ("YamlError", false),

            GuardiaoError::Database(_) => ("DatabaseError", false),
            GuardiaoError::Io(_) => ("IoError", false),
            GuardiaoError::Internal(_) => ("InternalError", false),
        };
        ErrorClassification { error_type, retryable }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_retryable() {
        let err = GuardiaoError::RateLimit("too many requests".into());
        let class = err.classify();
        assert!(class.retryable);
        assert_eq!(class.error_type, "RateLimitError");
    }

    #[test]
    fn test_auth_error_not_retryable() {
        let err = GuardiaoError::Authentication("bad key".into());
        let class = err.classify();
        assert!(!class.retryable);
        assert_eq!(class.error_type, "AuthenticationError");
    }

    #[test]
    fn test_network_and_timeout_retryable() {
        assert!(GuardiaoError::Network("connection refused".into()).classify().retryable);
        assert!(GuardiaoError::Timeout("timed out".into()).classify().retryable);
    }

    #[test]
    fn test_malformed_response_not_retryable() {
        let err = GuardiaoError::MalformedResponse("no JSON array".into());
        assert!(!err.classify().retryable);
    }

    #[test]
    fn test_billing_not_retryable() {
        let err = GuardiaoError::Billing("quota exceeded".into());
        assert_eq!(err.classify().error_type, "BillingError");
        assert!(!err.classify().retryable);
    }

    #[test]
    fn test_database_not_retryable() {
        let err = GuardiaoError::Database("disk I/O error".into());
        assert!(!err.classify().retryable);
    }
}
