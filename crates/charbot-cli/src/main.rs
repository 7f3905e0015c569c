//! CharBot terminal chat client entry point.
//!
//! Binary name: `charbot`
//!
//! Parses CLI arguments, sets up logging, loads configuration, then
//! dispatches to the chat loop or one of the utility commands.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,charbot_core=debug,charbot_infra=debug",
        _ => "trace",
    };
    charbot_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    // Shell completions don't need configuration
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "charbot", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli).await?;

    let result = match cli.command {
        None => cli::chat::loop_runner::run_chat_loop(&state).await,
        Some(Commands::Chat { endpoint, history }) => {
            let state = state.with_overrides(endpoint, history);
            cli::chat::loop_runner::run_chat_loop(&state).await
        }
        Some(Commands::Config) => cli::config::show_config(&state, cli.json),
        Some(Commands::Completions { .. }) => Ok(()),
    };

    charbot_observe::tracing_setup::shutdown_tracing();
    result
}
