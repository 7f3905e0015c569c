//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and control the session rather than being sent
//! to the character.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Leave the chat (stays signed in).
    Exit,
    /// Reprint the transcript.
    History,
    /// Show connectivity and credential state.
    Status,
    /// Retry credential acquisition.
    Reauth,
    /// Sign out and discard the conversation.
    SignOut,
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

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/history" => Some(ChatCommand::History),
        "/status" => Some(ChatCommand::Status),
        "/reauth" | "/login" => Some(ChatCommand::Reauth),
        "/signout" | "/logout" => Some(ChatCommand::SignOut),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Commands listed by `/help`, with their descriptions.
const HELP_ENTRIES: &[(&str, &str)] = &[
    ("/help", "Show this help message"),
    ("/clear", "Clear the screen"),
    ("/history", "Show the conversation so far"),
    ("/status", "Show connection status"),
    ("/reauth", "Retry signing in"),
    ("/signout", "Sign out and end the conversation"),
    ("/exit", "Leave the chat"),
];

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (name, description) in HELP_ENTRIES {
        println!("  {:<10} {description}", style(name).cyan());
    }
    println!();
    println!("  {}", style("Enter to send, Ctrl+D to exit").dim());
    println!();
}
