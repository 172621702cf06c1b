pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod repl;
pub mod search;
pub mod utils;
