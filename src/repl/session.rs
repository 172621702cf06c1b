use std::sync::Arc;

use console::style;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use tracing::debug;

use crate::errors::GuardiaoError;
use crate::models::{AggregatedAnalysis, ChatHistory};
use crate::pipeline::Orchestrator;
use crate::repl::banner;
use crate::repl::commands::{self, ReplInput, SlashCommand};
use crate::repl::completer::ReplHelper;
use crate::repl::renderer;

/// Interactive chat over one orchestrator. The analysis is loaded on the
/// first question and refreshed by `/run`.
pub struct ReplSession {
    orchestrator: Arc<Orchestrator>,
    history: ChatHistory,
    analysis: Option<AggregatedAnalysis>,
    splash: bool,
}

impl ReplSession {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            history: ChatHistory::new(),
            analysis: None,
            splash: true,
        }
    }

    /// Skip the full-screen splash and print only the header.
    pub fn without_splash(mut self) -> Self {
        self.splash = false;
        self
    }

    pub async fn run(mut self) -> Result<(), GuardiaoError> {
        if self.splash {
            banner::show_splash();
        } else {
            banner::print_header();
        }

        let config = Config::builder().auto_add_history(true).build();
        let mut editor = Editor::with_config(config)
            .map_err(|e| GuardiaoError::Internal(format!("Failed to initialize REPL: {}", e)))?;
        editor.set_helper(Some(ReplHelper));

        loop {
            let readline = {
                // rustyline is blocking, so use spawn_blocking
                let result = tokio::task::spawn_blocking(move || {
                    let term_w = console::Term::stdout().size().1 as usize;
                    let sep = format!("{}", style("─".repeat(term_w)).dim());
                    let prompt = format!("{}\n{} ", sep, style("guardiao>").green().bold());
                    let result = editor.readline(&prompt);
                    (editor, result)
                })
                .await
                .map_err(|e| GuardiaoError::Internal(format!("Readline task failed: {}", e)))?;

                editor = result.0;
                result.1
            };

            match readline {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    let term_w = console::Term::stdout().size().1 as usize;
                    println!("{}", style("─".repeat(term_w)).dim());

                    match commands::parse_input(trimmed) {
                        Ok(ReplInput::Question(question)) => self.handle_question(&question).await,
                        Ok(ReplInput::Command(cmd)) => {
                            if self.handle_command(cmd).await {
                                break;
                            }
                        }
                        Err(msg) => println!("{}", renderer::render_error(&msg)),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    println!("{}", renderer::render_error(&format!("Input error: {}", err)));
                    break;
                }
            }
        }

        println!("{}", renderer::render_info("Até logo. Fique atento aos golpes!"));
        Ok(())
    }

    async fn analysis(&mut self) -> &AggregatedAnalysis {
        if self.analysis.is_none() {
            self.analysis = Some(self.orchestrator.current_analysis().await);
        }
        self.analysis.get_or_insert_with(AggregatedAnalysis::empty)
    }

    async fn handle_question(&mut self, question: &str) {
        let orchestrator = self.orchestrator.clone();
        let analysis = self.analysis().await.clone();
        let answer = orchestrator.respond(question, &analysis).await;
        println!("{}", renderer::render_answer(&answer));
        self.history.push(question, &answer);
        debug!(exchanges = self.history.len(), "Exchange recorded");
    }

    /// Returns true when the session should end.
    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Exit => return true,

            SlashCommand::Clear => {
                self.history.clear();
                print!("\x1B[2J\x1B[1;1H");
                banner::print_header();
            }

            SlashCommand::History => {
                println!("{}", renderer::render_history(&self.history));
            }

            SlashCommand::Analysis => {
                let analysis = self.analysis().await;
                println!("{}", renderer::render_analysis(analysis));
            }

            SlashCommand::Top { n } => {
                let analysis = self.analysis().await;
                println!("{}", renderer::render_top(analysis, n));
            }

            SlashCommand::Run => {
                let run = self.orchestrator.run_pipeline().await;
                // Let the progress task print its completion line first
                tokio::task::yield_now().await;
                println!(
                    "{}",
                    renderer::render_success(&format!(
                        "{} novos relatos, {} no total",
                        run.new_reports.len(),
                        run.analysis.total()
                    ))
                );
                self.analysis = Some(run.analysis);
            }

            SlashCommand::Help { command } => {
                println!("{}", renderer::render_help(command.as_deref()));
            }

            SlashCommand::Version => {
                println!("{}", renderer::render_version());
            }
        }
        false
    }
}
