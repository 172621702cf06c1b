use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> String {
    if let Some(var_name) = value.strip_prefix('$') {
        match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                resolved
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set, using literal");
                value.to_string()
            }
        }
    } else {
        value.to_string()
    }
}

/// Conventional environment variable holding the API key of an LLM provider.
pub fn api_key_env_var(provider: &str) -> Option<&'static str> {
    match provider {
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        "openai" => Some("OPENAI_API_KEY"),
        "gemini" => Some("GEMINI_API_KEY"),
        "openrouter" => Some("OPENROUTER_API_KEY"),
        "perplexity" => Some("PERPLEXITY_API_KEY"),
        _ => None,
    }
}

/// Configured key (after `$VAR` resolution) or the provider's conventional
/// environment variable. Empty when neither is available.
pub fn resolve_api_key(provider: &str, configured: Option<&str>) -> String {
    if let Some(value) = configured {
        let resolved = resolve_credential(value);
        if !resolved.is_empty() && !resolved.starts_with('$') {
            return resolved;
        }
    }
    api_key_env_var(provider)
        .and_then(|var| std::env::var(var).ok())
        .unwrap_or_default()
}

/// Redact secrets from a string before it reaches the logs.
pub fn redact_credentials(text: &str, secrets: &[&str]) -> String {
    let mut result = text.to_string();
    for secret in secrets {
        if !secret.is_empty() && secret.len() >= 4 {
            result = result.replace(secret, "[REDACTED]");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("sk-literal"), "sk-literal");
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_GUARDIAO_CRED", "secret123");
        assert_eq!(resolve_credential("$TEST_GUARDIAO_CRED"), "secret123");
        std::env::remove_var("TEST_GUARDIAO_CRED");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        let result = resolve_credential("$NONEXISTENT_GUARDIAO_VAR");
        assert_eq!(result, "$NONEXISTENT_GUARDIAO_VAR");
    }

    #[test]
    fn test_resolve_api_key_prefers_configured_value() {
        assert_eq!(resolve_api_key("local", Some("abc-123")), "abc-123");
    }

    #[test]
    fn test_resolve_api_key_unresolved_reference_is_empty_for_unknown_provider() {
        assert_eq!(resolve_api_key("local", Some("$NONEXISTENT_GUARDIAO_KEY")), "");
        assert_eq!(resolve_api_key("local", None), "");
    }

    #[test]
    fn test_api_key_env_var_names() {
        assert_eq!(api_key_env_var("anthropic"), Some("ANTHROPIC_API_KEY"));
        assert_eq!(api_key_env_var("perplexity"), Some("PERPLEXITY_API_KEY"));
        assert_eq!(api_key_env_var("local"), None);
    }

    #[test]
    fn test_redact_credentials() {
        let text = "GET ...?key=AIzaSecret&cx=ab";
        let redacted = redact_credentials(text, &["AIzaSecret", "ab"]);
        assert!(redacted.contains("[REDACTED]"));
        assert!(!redacted.contains("AIzaSecret"));
        assert!(redacted.contains("cx=ab"));
    }
}
