//! CLI command definitions for the `charbot` binary.
//!
//! Uses clap derive macros for argument parsing. Running `charbot` with no
//! subcommand starts a chat.

pub mod chat;
pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with your favorite characters.
#[derive(Parser)]
#[command(name = "charbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Read configuration from this file instead of the default location.
    #[arg(long, global = true, env = "CHARBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (the default).
    Chat {
        /// Generation endpoint URL (overrides the config file).
        #[arg(long)]
        endpoint: Option<String>,

        /// Send prior turns with every prompt.
        #[arg(long)]
        history: bool,
    },

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_chat() {
        let cli = Cli::try_parse_from(["charbot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_chat_flags() {
        let cli = Cli::try_parse_from([
            "charbot",
            "chat",
            "--endpoint",
            "http://localhost:9000/generate",
            "--history",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Chat { endpoint, history }) => {
                assert_eq!(endpoint.as_deref(), Some("http://localhost:9000/generate"));
                assert!(history);
            }
            _ => panic!("expected chat command"),
        }
    }
}
