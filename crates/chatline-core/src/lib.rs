pub mod error;
pub mod constants;
pub mod llm;
pub mod context;
pub mod config;
pub mod session;

// Re-export key types
pub use error::ChatError;
pub use llm::{
    normalize_reply, BackendConnector, GatewayStatus, InferenceBackend, ModelGateway, ProviderId,
    Role, Turn,
};
pub use context::{ConversationMemory, HistoryStore, PromptAssembler};
pub use config::Settings;
pub use session::ChatSession;
