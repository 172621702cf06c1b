use clap::{Args, Parser, Subcommand};

use crate::config::ConfigOverrides;

#[derive(Parser)]
#[command(name = "guardiao", version, about = "O Guardião: educação financeira contra golpes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every pipeline command.
#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// YAML configuration file (default: ./guardiao.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding the database
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// LLM provider: anthropic, openai, gemini, openrouter, perplexity, local
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// LLM model identifier
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// LLM API key (or use env vars)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Override the provider endpoint
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Answer from templates instead of the LLM
    #[arg(long, global = true)]
    pub offline: bool,
}

impl GlobalArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self.data_dir.clone(),
            provider: self.provider.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            offline: self.offline,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect new reports and recompute the statistics
    Run,
    /// Show the current statistics
    Analysis(AnalysisArgs),
    /// Ask one question about financial fraud
    Ask(AskArgs),
    /// Prevention notes for the most frequent fraud types
    Informativo(InformativoArgs),
    /// Interactive chat
    Chat(ChatArgs),
    /// Start the HTTP JSON API
    Serve(ServeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct AnalysisArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct AskArgs {
    /// The question, in Portuguese
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    pub fn question(&self) -> String {
        self.question.join(" ")
    }
}

#[derive(Args, Clone)]
pub struct InformativoArgs {
    /// Number of fraud types to cover
    #[arg(long, default_value = "5")]
    pub top: usize,
}

#[derive(Args, Clone)]
pub struct ChatArgs {
    /// Skip the splash screen
    #[arg(long)]
    pub no_splash: bool,
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "8080")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(value_name = "CONFIG")]
    pub path: String,
}
