//! Main chat loop orchestration.
//!
//! Builds the credential source and generation client from configuration,
//! starts a `ChatSession`, then reads lines until EOF, `/exit` or
//! `/signout`. Everything shown on screen after startup is driven by the
//! session's event bus: appended assistant messages, connectivity flips and
//! credential changes.

use std::time::Duration;

use console::style;
use crossterm::style::Color;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::broadcast::Receiver;
use tracing::{debug, warn};

use charbot_core::auth::box_source::BoxCredentialSource;
use charbot_core::chat::engine::{EngineOptions, RejectReason, SendOutcome};
use charbot_core::chat::session::ChatSession;
use charbot_core::event::bus::EventBus;
use charbot_core::generation::box_client::BoxGenerationClient;
use charbot_infra::auth::credential_source_from_config;
use charbot_infra::generation::http::HttpGenerationClient;
use charbot_types::connectivity::ConnectivityStatus;
use charbot_types::error::AuthError;
use charbot_types::event::ExchangeEvent;
use charbot_types::message::Sender;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

type Session = ChatSession<BoxCredentialSource, BoxGenerationClient>;

/// Run the interactive chat loop against the configured endpoint.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let config = &state.config;
    let source = credential_source_from_config(&config.auth)?;
    let client = BoxGenerationClient::new(HttpGenerationClient::new(
        config.endpoint.clone(),
        Duration::from_secs(config.request_timeout_secs),
    ));

    let events = EventBus::default();
    let mut rx = events.subscribe();
    let options = EngineOptions {
        greeting: Some(config.greeting.clone()),
        send_history: config.send_history,
        events,
    };

    let session: Session = match ChatSession::start(source, client, options).await {
        Ok(session) => session,
        Err(AuthError::NotSignedIn) => {
            eprintln!(
                "\n  {} Not signed in. Set {} and {} (or configure [auth]) and try again.\n",
                style("!").yellow().bold(),
                style(&config.auth.user_var).cyan(),
                style(&config.auth.token_var).cyan(),
            );
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let user = session
        .engine()
        .tokens()
        .identity()
        .map(|identity| identity.to_string())
        .unwrap_or_default();
    print_welcome_banner(&user, &config.endpoint);

    let renderer = ChatRenderer::new(Some(Color::Cyan));
    let (mut chat_input, _writer) = ChatInput::new(prompt_for(&session))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    // Greeting and the initial credential outcome are already queued.
    drain_events(&mut rx, &renderer, &session, &mut chat_input);
    if !session.has_credential() {
        println!(
            "  {} Could not get a credential. Type /reauth to retry.\n",
            style("!").yellow().bold()
        );
    }

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::History => {
                            println!();
                            for message in session.transcript() {
                                renderer.print_message(&message);
                            }
                        }
                        ChatCommand::Status => print_status(&session),
                        ChatCommand::Reauth => match session.reauthenticate().await {
                            Ok(()) => println!("\n  {} Signed in.\n", style("*").green().bold()),
                            Err(err) => println!(
                                "\n  {} Sign-in failed: {err}\n",
                                style("!").red().bold()
                            ),
                        },
                        ChatCommand::SignOut => {
                            if let Err(err) = session.sign_out().await {
                                warn!(error = %err, "Sign-out reported an error");
                            }
                            println!("\n  {}", style("Signed out. Conversation discarded.").dim());
                            return Ok(());
                        }
                        ChatCommand::Unknown(name) => println!(
                            "\n  {} Unknown command: {}. Type /help for available commands.\n",
                            style("?").yellow().bold(),
                            style(name).dim()
                        ),
                    }
                    drain_events(&mut rx, &renderer, &session, &mut chat_input);
                    continue;
                }

                let spinner = thinking_spinner();
                let outcome = session.send(&text).await;
                spinner.finish_and_clear();

                match &outcome {
                    SendOutcome::Rejected(reason) => print_rejection(*reason),
                    SendOutcome::Replied { .. } => {}
                    SendOutcome::Failed { error, .. } => {
                        debug!(error = %error, "Exchange failed");
                    }
                }

                drain_events(&mut rx, &renderer, &session, &mut chat_input);
            }
        }
    }

    Ok(())
}

/// Render everything published since the last drain.
///
/// User messages are not echoed: the input line already shows them.
fn drain_events(
    rx: &mut Receiver<ExchangeEvent>,
    renderer: &ChatRenderer,
    session: &Session,
    input: &mut ChatInput,
) {
    loop {
        match rx.try_recv() {
            Ok(ExchangeEvent::MessageAppended { message }) => {
                if message.sender == Sender::Assistant {
                    renderer.print_message(&message);
                }
            }
            Ok(ExchangeEvent::ConnectivityChanged { status }) => match status {
                ConnectivityStatus::Connected => {
                    println!("  {} {}\n", style("●").green(), style("Online").dim())
                }
                ConnectivityStatus::Disconnected => {
                    println!("  {} {}\n", style("●").red(), style("Offline").dim())
                }
            },
            Ok(ExchangeEvent::CredentialChanged { .. }) => {
                input.update_prompt(&prompt_for(session));
            }
            Ok(ExchangeEvent::AwaitingReplyChanged { .. }) => {}
            Err(TryRecvError::Lagged(skipped)) => {
                debug!(skipped, "Event receiver lagged");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

fn prompt_for(session: &Session) -> String {
    if session.has_credential() {
        format!("  {} ", style("You >").green().bold())
    } else {
        format!("  {} ", style("Authenticating... >").yellow().bold())
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn print_rejection(reason: RejectReason) {
    match reason {
        RejectReason::EmptyInput => {}
        RejectReason::AwaitingReply => println!(
            "  {}",
            style("Still waiting for the previous reply.").dim()
        ),
        RejectReason::NoCredential => println!(
            "  {} Not signed in yet. Type /reauth to retry.\n",
            style("!").yellow().bold()
        ),
    }
}

fn print_status(session: &Session) {
    let indicator = if session.is_online() {
        style("● Online").green()
    } else {
        style("● Offline").red()
    };
    println!();
    println!("  {indicator}");
    println!(
        "  {}  {}",
        style("Connectivity:").bold(),
        style(session.connectivity()).dim()
    );
    println!(
        "  {}    {}",
        style("Credential:").bold(),
        style(if session.has_credential() { "held" } else { "none" }).dim()
    );
    println!(
        "  {}      {}",
        style("Messages:").bold(),
        style(session.engine().transcript().len()).dim()
    );
    println!();
}
