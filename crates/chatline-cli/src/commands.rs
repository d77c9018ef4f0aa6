/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Clear the conversation in memory and on disk.
    Clear,
    /// Quit the application.
    Quit,
    /// Print the retained conversation.
    ShowHistory,
    /// Export the conversation, optionally to a given path.
    Export(Option<String>),
    /// Replace the conversation with the contents of a file.
    Import(String),
    /// Show provider, model and history status.
    ShowStatus,
    /// Forget a failed backend and try to initialize again.
    Retry,
    /// Not a command - treat as regular input.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let input = input.trim();
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/clear" => CommandResult::Clear,
        "/history" => CommandResult::ShowHistory,
        "/status" => CommandResult::ShowStatus,
        "/retry" => CommandResult::Retry,
        "/export" => {
            if arg.is_empty() {
                CommandResult::Export(None)
            } else {
                CommandResult::Export(Some(arg.to_string()))
            }
        }
        "/import" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /import <path-to-json>".into())
            } else {
                CommandResult::Import(arg.to_string())
            }
        }
        "/version" => CommandResult::Message(format!("Chatline v{}", env!("CARGO_PKG_VERSION"))),

        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ Chatline Commands ────────────────────────────────────────────╮

  CONVERSATION
    /history                  Show the retained conversation
    /clear                    Clear chat history (memory and file)
    /export [path]            Export conversation as JSON
    /import <path>            Replace conversation from a JSON file

  BACKEND
    /status                   Show provider, model and history info
    /retry                    Retry a failed backend initialization

  OTHER
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit the application

╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
