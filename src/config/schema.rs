use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "data_dir": { "type": "string" },
            "prompts_dir": { "type": "string" },
            "llm": {
                "type": "object",
                "properties": {
                    "provider": {
                        "type": "string",
                        "enum": ["anthropic", "openai", "gemini", "openrouter", "perplexity", "local"]
                    },
                    "model": { "type": "string" },
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "max_tokens": { "type": "integer", "minimum": 64 }
                },
                "additionalProperties": false
            },
            "search": {
                "type": "object",
                "properties": {
                    "api_key": { "type": "string" },
                    "engine_id": { "type": "string" },
                    "max_results": { "type": "integer", "minimum": 1, "maximum": 10 },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                },
                "additionalProperties": false
            },
            "collector": {
                "type": "object",
                "properties": {
                    "mode": { "type": "string", "enum": ["llm", "search"] },
                    "year": { "type": "integer", "minimum": 2000 },
                    "sources": { "type": "array", "items": { "type": "string" } }
                },
                "additionalProperties": false
            },
            "responder": {
                "type": "object",
                "properties": {
                    "mode": { "type": "string", "enum": ["llm", "template"] },
                    "sample_rows": { "type": "integer", "minimum": 0 },
                    "max_words": { "type": "integer", "minimum": 50 }
                },
                "additionalProperties": false
            },
            "retry": {
                "type": "object",
                "properties": {
                    "max_retries": { "type": "integer", "minimum": 0, "maximum": 5 },
                    "base_delay_ms": { "type": "integer", "minimum": 0 }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
});
