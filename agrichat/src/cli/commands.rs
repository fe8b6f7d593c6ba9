//! CLI command execution.
//!
//! Every command drives the same [`ChatController`] over a terminal surface;
//! one-shot commands initialize quietly and print only what they were asked for.

use std::io::{IsTerminal, Stdout, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{ChatBackend, HttpBackend};
use crate::config::{self, Config, CONFIG_FILE};
use crate::controller::{ChatController, SessionState};
use crate::session::{resolve_session_id, save_session_id};
use crate::view::{write_sidebar, write_transcript, Surface, TerminalSurface};

use super::args::{Cli, Commands};
use super::repl::{ReplCommand, HELP};

type Controller<B> = ChatController<B, TerminalSurface<Stdout>>;

// === Command Execution ===

pub async fn execute(cli: Cli) -> Result<()> {
    let data_dir = config::data_dir()?;
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| data_dir.join(CONFIG_FILE));
    let config = Config::load(&config_path)?.with_overrides(cli.base_url.clone(), cli.timeout);

    let backend = HttpBackend::new(&config.base_url, config.timeout())
        .context("Failed to create HTTP client")?;
    tracing::info!("using chat backend at {}", backend.base_url());

    let session_id = resolve_session_id(cli.session.as_deref(), &data_dir)?;
    tracing::debug!("starting in session {session_id}");

    let stdout = std::io::stdout();
    let ansi = stdout.is_terminal();
    let mut controller = ChatController::new(
        backend,
        TerminalSurface::new(stdout, ansi),
        SessionState::new(session_id),
        config.welcome_message,
    );

    let result = match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&mut controller, &data_dir).await,
        Commands::Ask { question } => ask_once(&mut controller, &question.join(" ")).await,
        Commands::Sessions => list_sessions(&mut controller).await,
        Commands::History { id } => show_history(&mut controller, id.as_deref()).await,
        Commands::New => start_new_chat(&mut controller).await,
        Commands::Delete { id } => delete_session(&mut controller, &id).await,
    };

    save_session_id(&data_dir, controller.state().current())?;
    result
}

/// Initialize without echoing the current transcript.
async fn initialize_quietly<B: ChatBackend>(controller: &mut Controller<B>) {
    controller.surface_mut().set_echo(false);
    controller.initialize().await;
}

fn print_sessions<B: ChatBackend>(controller: &Controller<B>) -> Result<()> {
    let mut out = std::io::stdout();
    write_sidebar(&mut out, &controller.surface().page().sidebar)
        .context("Failed to write sessions")
}

fn print_transcript<B: ChatBackend>(controller: &Controller<B>) -> Result<()> {
    let mut out = std::io::stdout();
    write_transcript(&mut out, &controller.surface().page().messages)
        .context("Failed to write messages")
}

/// Map a session reference (id, prefix or list position) to a known id.
fn resolve_reference<B: ChatBackend>(
    controller: &Controller<B>,
    reference: &str,
) -> Option<String> {
    controller.state().resolve(reference).map(str::to_string)
}

async fn ask_once<B: ChatBackend>(controller: &mut Controller<B>, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        bail!("Question is required for ask command");
    }

    initialize_quietly(controller).await;
    controller.surface_mut().set_echo(true);
    controller.ask(question).await;
    Ok(())
}

async fn list_sessions<B: ChatBackend>(controller: &mut Controller<B>) -> Result<()> {
    initialize_quietly(controller).await;
    print_sessions(controller)
}

async fn show_history<B: ChatBackend>(
    controller: &mut Controller<B>,
    reference: Option<&str>,
) -> Result<()> {
    initialize_quietly(controller).await;

    if let Some(reference) = reference {
        let Some(session_id) = resolve_reference(controller, reference) else {
            bail!("No conversation matches '{reference}'");
        };
        controller.select_chat(&session_id).await?;
    }

    print_transcript(controller)
}

async fn start_new_chat<B: ChatBackend>(controller: &mut Controller<B>) -> Result<()> {
    initialize_quietly(controller).await;

    if !controller.new_chat().await {
        bail!("Failed to start a new conversation (run with -v for details)");
    }

    println!("Started conversation {}", controller.state().current());
    Ok(())
}

async fn delete_session<B: ChatBackend>(
    controller: &mut Controller<B>,
    reference: &str,
) -> Result<()> {
    initialize_quietly(controller).await;

    // Unknown ids are still sent; the backend may know sessions we don't list.
    let session_id =
        resolve_reference(controller, reference).unwrap_or_else(|| reference.to_string());
    if !controller.delete_chat(&session_id).await {
        bail!("Failed to delete conversation {session_id} (run with -v for details)");
    }

    println!("Deleted conversation {session_id}");
    println!("Current conversation: {}", controller.state().current());
    Ok(())
}

// === Interactive Chat ===

fn print_prompt() -> Result<()> {
    let mut out = std::io::stdout();
    write!(out, "> ")?;
    out.flush().context("Failed to flush stdout")
}

async fn run_chat<B: ChatBackend>(controller: &mut Controller<B>, data_dir: &Path) -> Result<()> {
    controller.initialize().await;
    println!("Type a question, or /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_prompt()?;
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            println!();
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Ask(question) => {
                controller.ask(&question).await;
            }
            ReplCommand::New => {
                if !controller.new_chat().await {
                    println!("Could not start a new conversation.");
                }
            }
            ReplCommand::Delete(reference) => {
                let Some(session_id) = resolve_reference(controller, &reference) else {
                    println!("No conversation matches '{reference}'.");
                    continue;
                };
                if controller.delete_chat(&session_id).await {
                    println!("Deleted conversation {session_id}.");
                } else {
                    println!("Could not delete conversation {session_id}.");
                }
            }
            ReplCommand::Select(reference) => {
                let Some(session_id) = resolve_reference(controller, &reference) else {
                    println!("No conversation matches '{reference}'.");
                    continue;
                };
                if controller.state().is_current(&session_id) {
                    println!("Already in that conversation.");
                    continue;
                }
                controller.select_chat(&session_id).await?;
            }
            ReplCommand::Sessions => print_sessions(controller)?,
            ReplCommand::History => print_transcript(controller)?,
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Usage(usage) => println!("Usage: {usage}"),
            ReplCommand::Unknown(command) => {
                println!("Unknown command: {command} (try /help)");
            }
        }

        if let Err(e) = save_session_id(data_dir, controller.state().current()) {
            tracing::warn!("failed to save current session: {e:#}");
        }
    }

    Ok(())
}
