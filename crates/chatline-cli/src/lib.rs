// Library interface for chatline-cli
// This allows integration tests to access internal modules

// commands.rs and theme.rs are also declared in main.rs, so the path
// attribute points at the same source file.

#[path = "commands.rs"]
pub mod commands;

#[path = "theme.rs"]
pub mod theme;

pub use commands::{handle_command, CommandResult};
pub use theme::Theme;
