mod history;
mod prompt;
pub mod persistence;

pub use history::ConversationMemory;
pub use prompt::PromptAssembler;
pub use persistence::HistoryStore;
