//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(user: &str, endpoint: &str) {
    println!();
    println!("  {} {}", style("*").cyan(), style("CharacterBot").cyan().bold());
    println!();
    println!("  {}     {}", style("User:").bold(), style(user).dim());
    println!("  {} {}", style("Endpoint:").bold(), style(endpoint).dim());
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
