use console::style;

use crate::models::{AggregatedAnalysis, Category, ChatHistory};
use crate::repl::commands::{CommandHelp, COMMAND_HELP};
use crate::utils::formatting::bar;

const BAR_WIDTH: usize = 24;
const LABEL_WIDTH: usize = 34;

/// Render the help listing for all commands.
pub fn render_help(specific_command: Option<&str>) -> String {
    if let Some(cmd_name) = specific_command {
        if let Some(cmd) = COMMAND_HELP.iter().find(|c| c.name == cmd_name) {
            return format_command_detail(cmd);
        } else {
            return format!("{} Unknown command: /{}", style("✗").red(), cmd_name);
        }
    }

    let mut out = String::new();
    out.push_str(&format!("\n{}\n\n", style("Available commands:").white().bold()));
    for cmd in COMMAND_HELP {
        out.push_str(&format!(
            "  {:<16} {}\n",
            style(format!("/{}", cmd.name)).green().bold(),
            style(cmd.description).dim(),
        ));
    }
    out.push_str(&format!("\n  {}\n", style("Any other text is sent as a question.").dim()));
    out
}

fn format_command_detail(cmd: &CommandHelp) -> String {
    format!(
        "\n{}\n  {}\n\n  {}\n",
        style(format!("/{}", cmd.name)).green().bold(),
        style(cmd.description).dim(),
        style(cmd.usage).white(),
    )
}

/// Render the version info.
pub fn render_version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    let build_ts = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown");

    format!(
        "\n  {} {}\n  {} {}\n  {} {}\n",
        style("Version:").dim(),
        style(version).white().bold(),
        style("Commit:").dim(),
        style(git_hash).white(),
        style("Built:").dim(),
        style(build_ts).white(),
    )
}

pub fn render_error(msg: &str) -> String {
    format!("{} {}", style("✗").red(), style(msg).red())
}

pub fn render_success(msg: &str) -> String {
    format!("{} {}", style("✓").green(), msg)
}

pub fn render_info(msg: &str) -> String {
    format!("{}", style(msg).dim())
}

/// Text dashboard: the total plus one bar chart per grouped category.
pub fn render_analysis(analysis: &AggregatedAnalysis) -> String {
    if analysis.has_no_data() {
        return format!(
            "\n  {} {}\n",
            style("⚠").yellow(),
            style("Nenhum dado disponível. Execute o pipeline primeiro (guardiao run ou /run).").yellow(),
        );
    }

    let mut out = format!(
        "\n  {} {}\n",
        style(format!("{}:", Category::TotalFraudCount.display_name())).white().bold(),
        style(analysis.total()).green().bold(),
    );
    for category in Category::GROUPED {
        let ranked = analysis.ranked(category);
        if ranked.is_empty() {
            continue;
        }
        out.push_str(&format!("\n  {}\n", style(category.display_name()).green().bold()));
        out.push_str(&render_bars(&ranked));
    }
    out
}

/// Top-N fraud types as a ranked bar list.
pub fn render_top(analysis: &AggregatedAnalysis, n: usize) -> String {
    let top = analysis.top_fraud_types(n);
    if top.is_empty() {
        return render_info("Nenhum golpe registrado ainda.");
    }
    format!(
        "\n  {}\n{}",
        style(format!("Top {} golpes", top.len())).green().bold(),
        render_bars(&top)
    )
}

fn render_bars(ranked: &[(&str, u64)]) -> String {
    let max = ranked.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let mut out = String::new();
    for (label, count) in ranked {
        let label: String = label.chars().take(LABEL_WIDTH).collect();
        let padding = LABEL_WIDTH.saturating_sub(label.chars().count());
        out.push_str(&format!(
            "    {}{} {} {}\n",
            label,
            " ".repeat(padding),
            style(bar(*count, max, BAR_WIDTH)).green(),
            style(count).dim(),
        ));
    }
    out
}

/// A responder answer framed for the terminal.
pub fn render_answer(answer: &str) -> String {
    format!("\n{}\n\n{}\n", style("O Guardião:").green().bold(), answer.trim_end())
}

pub fn render_history(history: &ChatHistory) -> String {
    if history.is_empty() {
        return render_info("Nenhuma pergunta nesta sessão.");
    }
    let mut out = String::new();
    for (i, exchange) in history.exchanges().iter().enumerate() {
        out.push_str(&format!(
            "\n{} {} {}\n",
            style(format!("[{}]", i + 1)).dim(),
            style("Você:").cyan().bold(),
            exchange.user,
        ));
        out.push_str(&format!("{}\n{}\n", style("O Guardião:").green().bold(), exchange.bot.trim_end()));
    }
    out
}
