pub mod provider;
pub mod anthropic;
pub mod openai;
pub mod gemini;
pub mod retrying;
pub mod router;
pub mod types;

pub use provider::TextGenerator;
pub use retrying::RetryingGenerator;
pub use router::create_provider;
pub use types::LLMResponse;
