//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and cover the session controls the sidebar
//! offered in hosted UIs: reset, model selection, key entry.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Reset: empty the transcript and clear the screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Re-print the transcript.
    History,
    /// Switch to another model from the fixed menu.
    Model(String),
    /// Replace the API key interactively.
    Key,
    /// Known command used incorrectly; holds the usage hint.
    Malformed(&'static str),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim().to_string());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/reset" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/history" => Some(ChatCommand::History),
        "/key" => Some(ChatCommand::Key),
        "/model" => match arg {
            Some(name) if !name.is_empty() => Some(ChatCommand::Model(name)),
            _ => Some(ChatCommand::Malformed(
                "usage: /model <name> (list models with `groqchat models`)",
            )),
        },
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     {}", style("/help").cyan(), "Show this help message");
    println!(
        "  {}    {}",
        style("/clear").cyan(),
        "Clear the chat (empties the transcript)"
    );
    println!("  {}  {}", style("/history").cyan(), "Re-print the transcript");
    println!(
        "  {}    {}",
        style("/model").cyan(),
        "Switch model (see `groqchat models`)"
    );
    println!("  {}      {}", style("/key").cyan(), "Set or replace the API key");
    println!("  {}     {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!("  {}", style("Ctrl+D to exit, Ctrl+C safe (no message loss)").dim());
    println!();
}
