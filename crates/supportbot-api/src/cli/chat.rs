//! Interactive terminal chat loop.
//!
//! Routes each line through the same `ChatService` the REST API uses, keeping
//! the conversation history in memory for the lifetime of the loop.

use std::io::Write;

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use supportbot_types::chat::{ChatMessage, Intent};

use crate::state::AppState;

/// In-chat controls.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Clear the conversation history.
    Reset,
    Exit,
    Unknown(String),
}

/// Parse a line as a chat command.
///
/// Bare `quit`/`exit` are accepted alongside the slash forms. Returns `None`
/// for ordinary messages.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "quit" || lower == "exit" {
        return Some(ChatCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = lower.split_whitespace().next().unwrap_or_default();
    match cmd {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/reset" | "/new" => Some(ChatCommand::Reset),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

fn print_banner(state: &AppState, model: &str) {
    println!();
    println!("  {}", style("Support Bot").cyan().bold());
    println!(
        "  {} {} via {}",
        style("Model:").bold(),
        style(model).dim(),
        style(state.chat_service.provider_name()).dim()
    );
    println!(
        "  {} {}",
        style("Catalog:").bold(),
        style(format!("{} products", state.chat_service.catalog().len())).dim()
    );
    println!(
        "  {}",
        style("Ask about products or order status. Type /help for commands, 'quit' to exit.").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

fn print_help() {
    println!();
    println!("  {}", style("Commands").bold());
    println!("  {}  Clear the conversation history", style("/reset").cyan());
    println!("  {}   Show this help", style("/help").cyan());
    println!("  {}   Exit (also: quit, exit)", style("/quit").cyan());
    println!();
}

fn prompt() -> std::io::Result<()> {
    print!("{} ", style("you >").green().bold());
    std::io::stdout().flush()
}

/// Run the chat loop until `quit` or end of input.
pub async fn run_chat(state: &AppState, model: Option<String>) -> anyhow::Result<()> {
    let model = model.unwrap_or_else(|| state.default_model().to_string());
    let mut history: Vec<ChatMessage> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_banner(state, &model);

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse(&line) {
            Some(ChatCommand::Exit) => break,
            Some(ChatCommand::Help) => {
                print_help();
                continue;
            }
            Some(ChatCommand::Reset) => {
                history.clear();
                println!("  {}", style("History cleared.").dim());
                continue;
            }
            Some(ChatCommand::Unknown(cmd)) => {
                println!(
                    "  {} Unknown command {}. Type /help for commands.",
                    style("!").yellow(),
                    style(cmd).yellow()
                );
                continue;
            }
            None => {}
        }

        match state.chat_service.respond(&history, &line, &model).await {
            Ok(turn) => {
                let label = match turn.intent {
                    Intent::OrderStatus => "bot (order) >",
                    Intent::ProductQuestion => "bot >",
                };
                println!("{}", style(label).cyan().bold());
                println!("{}", turn.reply.trim_end());
                println!();
                history = turn.messages;
            }
            Err(err) => {
                tracing::debug!("Chat turn failed: {err:?}");
                println!("  {} {}", style("✗").red(), style(&err).red());
                println!();
            }
        }
    }

    println!("  {}", style("Goodbye!").dim());
    Ok(())
}
