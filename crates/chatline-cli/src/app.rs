use anyhow::Result;
use chatline_core::session::default_export_path;
use chatline_core::{ChatError, ChatSession, GatewayStatus, Role, Settings, Turn};
use crossterm::style::Stylize;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{self, CommandResult};
use crate::theme::Theme;

// ── Single-prompt mode ──────────────────────────────────────────────────

pub async fn run_single_prompt(settings: Settings, prompt: &str) -> Result<()> {
    let mut session = ChatSession::new(settings)?;

    match session.send(prompt).await {
        Ok(reply) => println!("{reply}"),
        Err(ChatError::Generation(msg)) => {
            anyhow::bail!("Generation failed: {msg}");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

// ── Interactive loop ────────────────────────────────────────────────────

pub async fn run_repl(settings: Settings, theme: Theme) -> Result<()> {
    let mut session = ChatSession::new(settings)?;

    print_banner(&session, &theme);
    for turn in session.messages() {
        print_turn(&turn, &theme);
    }

    // Surface a broken backend before the user types anything.
    if let Err(e) = session.initialize().await {
        print_error(&e, &theme);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".with(theme.accent).bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match commands::handle_command(input) {
            CommandResult::NotACommand => send(&mut session, input, &theme).await,
            CommandResult::Quit => break,
            other => handle_result(&mut session, other, &theme).await,
        }
    }

    Ok(())
}

async fn send(session: &mut ChatSession, input: &str, theme: &Theme) {
    if let GatewayStatus::Failed(msg) = session.gateway_status() {
        println!(
            "{} {}",
            "blocked:".with(theme.error).bold(),
            format!("backend failed to initialize ({msg}). Fix the configuration and use /retry.")
                .with(theme.muted)
        );
        return;
    }

    match session.send(input).await {
        Ok(reply) => print_turn(&Turn::assistant(reply), theme),
        Err(e) => print_error(&e, theme),
    }
}

async fn handle_result(session: &mut ChatSession, result: CommandResult, theme: &Theme) {
    match result {
        CommandResult::Message(msg) => println!("{msg}"),
        CommandResult::Clear => {
            session.clear();
            println!("{}", "Chat history cleared.".with(theme.muted));
        }
        CommandResult::ShowHistory => {
            let messages = session.messages();
            if messages.is_empty() {
                println!("{}", "(no messages)".with(theme.muted));
            }
            for turn in &messages {
                print_turn(turn, theme);
            }
        }
        CommandResult::Export(path) => {
            let path = path.map(PathBuf::from).unwrap_or_else(default_export_path);
            match session.export_to(&path) {
                Ok(()) => println!(
                    "{}",
                    format!("Exported {} messages to {}", session.messages().len(), path.display())
                        .with(theme.muted)
                ),
                Err(e) => print_error(&e, theme),
            }
        }
        CommandResult::Import(path) => match session.import_from(&PathBuf::from(&path)) {
            Ok(count) => println!(
                "{}",
                format!("Imported {count} messages from {path}").with(theme.muted)
            ),
            Err(e) => print_error(&e, theme),
        },
        CommandResult::ShowStatus => println!("{}", status_text(session, theme)),
        CommandResult::Retry => {
            session.reset_gateway();
            match session.initialize().await {
                Ok(()) => println!("{}", "Backend ready.".with(theme.muted)),
                Err(e) => print_error(&e, theme),
            }
        }
        CommandResult::Quit | CommandResult::NotACommand => {}
    }
}

fn status_text(session: &ChatSession, theme: &Theme) -> String {
    let settings = session.settings();
    let model = settings
        .provider_id()
        .map(|p| settings.model_for(p).to_string())
        .unwrap_or_else(|| "-".to_string());
    let backend = match session.gateway_status() {
        GatewayStatus::Uninitialized => "not initialized".to_string(),
        GatewayStatus::Ready => "ready".to_string(),
        GatewayStatus::Failed(msg) => format!("failed: {msg}"),
    };

    format!(
        "Provider:     {}\nModel:        {}\nBackend:      {}\nHistory file: {}\nMessages:     {}/{}\nTheme:        {}",
        settings.provider,
        model,
        backend,
        session.store().path().display(),
        session.memory().len(),
        session.memory().capacity(),
        theme.name,
    )
}

fn print_banner(session: &ChatSession, theme: &Theme) {
    let settings = session.settings();
    println!("{}", "Chatline".with(theme.accent).bold());
    println!(
        "{}",
        format!(
            "provider: {} · max turns: {} · type /help for commands",
            settings.provider, settings.chat.max_turns
        )
        .with(theme.muted)
    );
}

fn print_turn(turn: &Turn, theme: &Theme) {
    let label = match turn.role {
        Role::User => "You:".with(theme.user_color).bold(),
        Role::Assistant => "Assistant:".with(theme.assistant_color).bold(),
    };
    println!("{label} {}", turn.content);
}

fn print_error(err: &ChatError, theme: &Theme) {
    let label = match err {
        ChatError::Initialization(_) => "init error:",
        ChatError::Generation(_) => "error:",
        _ => "warning:",
    };
    let color = match err {
        ChatError::Initialization(_) | ChatError::Generation(_) => theme.error,
        _ => theme.warning,
    };
    println!("{} {}", label.with(color).bold(), err);
}
