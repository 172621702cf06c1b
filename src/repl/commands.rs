/// Slash commands supported by the chat REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    History,
    Clear,
    Analysis,
    Run,
    Top {
        n: usize,
    },
    Version,
    Help {
        command: Option<String>,
    },
    Exit,
}

/// A line typed at the prompt: a question for the responder, or a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Question(String),
    Command(SlashCommand),
}

/// Description of a command for help display.
pub struct CommandHelp {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "history",
        usage: "/history",
        description: "Show the questions and answers of this session",
    },
    CommandHelp {
        name: "clear",
        usage: "/clear",
        description: "Forget the conversation and clear the screen",
    },
    CommandHelp {
        name: "analysis",
        usage: "/analysis",
        description: "Show the current fraud statistics",
    },
    CommandHelp {
        name: "top",
        usage: "/top [N]",
        description: "List the N most frequent fraud types (default 5)",
    },
    CommandHelp {
        name: "run",
        usage: "/run",
        description: "Collect new reports and recompute the statistics",
    },
    CommandHelp {
        name: "version",
        usage: "/version",
        description: "Show version and build info",
    },
    CommandHelp {
        name: "help",
        usage: "/help [command]",
        description: "Show help for all or a specific command",
    },
    CommandHelp {
        name: "exit",
        usage: "/exit",
        description: "Quit the chat",
    },
];

/// All command names for tab completion.
pub static COMMAND_NAMES: &[&str] = &[
    "/history",
    "/clear",
    "/analysis",
    "/top",
    "/run",
    "/version",
    "/help",
    "/exit",
];

/// Parse a raw input line. Anything not starting with `/` is a question.
pub fn parse_input(input: &str) -> Result<ReplInput, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".into());
    }
    if !input.starts_with('/') {
        return Ok(ReplInput::Question(input.to_string()));
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let cmd = parts[0];
    let args = &parts[1..];

    let command = match cmd {
        "/history" => SlashCommand::History,
        "/clear" => SlashCommand::Clear,
        "/analysis" => SlashCommand::Analysis,
        "/top" => parse_top(args)?,
        "/run" => SlashCommand::Run,
        "/version" => SlashCommand::Version,
        "/help" => SlashCommand::Help {
            command: args.first().map(|s| s.trim_start_matches('/').to_string()),
        },
        "/exit" | "/quit" | "/q" => SlashCommand::Exit,
        other => return Err(format!("Unknown command: {}. Type /help for available commands.", other)),
    };
    Ok(ReplInput::Command(command))
}

fn parse_top(args: &[&str]) -> Result<SlashCommand, String> {
    match args.first() {
        None => Ok(SlashCommand::Top { n: 5 }),
        Some(raw) => raw
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| SlashCommand::Top { n })
            .ok_or_else(|| format!("Invalid count for /top: {}", raw)),
    }
}
