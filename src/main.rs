use clap::Parser;
use tracing_subscriber::EnvFilter;

use guardiao::cli::{self, Commands};
use guardiao::config;
use guardiao::errors::GuardiaoError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, 0) => "warn",
        (_, 0) => "info",
        (_, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.with_ansi(!cli.no_color).init();
    }
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let global = &cli.global;
    let quiet = cli.quiet;
    let result = match cli.command {
        Commands::Run => cli::run::handle_run(global, quiet).await,
        Commands::Analysis(args) => cli::analysis::handle_analysis(args, global, quiet).await,
        Commands::Ask(args) => cli::ask::handle_ask(args, global, quiet).await,
        Commands::Informativo(args) => cli::ask::handle_informativo(args, global, quiet).await,
        Commands::Chat(args) => cli::chat::handle_chat(args, global).await,
        Commands::Serve(args) => cli::serve::handle_serve(args, global).await,
        Commands::Validate(args) => handle_validate(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                GuardiaoError::Config(_) => 2,
                GuardiaoError::Authentication(_) => 4,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), GuardiaoError> {
    let path = std::path::PathBuf::from(&args.path);
    let _config = config::parse_config(&path).await?;
    println!("Configuration is valid: {}", args.path);
    Ok(())
}
