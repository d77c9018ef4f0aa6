use crate::config::Settings;
use crate::constants::paths;
use crate::context::{ConversationMemory, HistoryStore};
use crate::error::ChatError;
use crate::llm::{GatewayStatus, ModelGateway, Role, Turn};
use std::path::{Path, PathBuf};

/// One chat session: the in-memory log, its on-disk mirror and the gateway.
///
/// The persisted history is the source of truth at startup; afterwards every
/// turn is written to both.
pub struct ChatSession {
    memory: ConversationMemory,
    store: HistoryStore,
    gateway: ModelGateway,
}

impl ChatSession {
    pub fn new(settings: Settings) -> Result<Self, ChatError> {
        let gateway = ModelGateway::new(settings);
        Self::with_gateway(gateway)
    }

    /// Build a session around an existing gateway, using its settings.
    pub fn with_gateway(gateway: ModelGateway) -> Result<Self, ChatError> {
        let settings = gateway.settings();
        settings.validate()?;

        let max_turns = settings.chat.max_turns;
        let store = HistoryStore::initialize(&settings.chat.history_file, max_turns);
        let memory = ConversationMemory::from_turns(max_turns, store.load());
        tracing::info!(
            path = %store.path().display(),
            turns = memory.len(),
            "loaded conversation history"
        );

        Ok(Self {
            memory,
            store,
            gateway,
        })
    }

    pub fn messages(&self) -> Vec<Turn> {
        self.memory.as_messages()
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        self.gateway.settings()
    }

    pub fn gateway_status(&self) -> GatewayStatus {
        self.gateway.status()
    }

    /// Build the backend now instead of on the first message.
    pub async fn initialize(&mut self) -> Result<(), ChatError> {
        self.gateway.initialize().await
    }

    /// Clear a failed backend so the next message retries initialization.
    pub fn reset_gateway(&mut self) {
        self.gateway.reset();
    }

    fn record(&mut self, role: Role, content: &str) {
        self.memory.add(role, content);
        self.store.append(role, content);
    }

    /// Send one user message and return the assistant reply.
    ///
    /// Initialization failures are returned before anything is recorded.
    /// Generation failures are recorded as an assistant turn describing the
    /// error, then returned so the caller can show them inline.
    pub async fn send(&mut self, user_text: &str) -> Result<String, ChatError> {
        self.gateway.initialize().await?;

        self.record(Role::User, user_text);
        let turns = self.memory.as_messages();

        match self.gateway.generate_from_turns(&turns).await {
            Ok(reply) => {
                self.record(Role::Assistant, &reply);
                Ok(reply)
            }
            Err(ChatError::Generation(msg)) => {
                let notice = format!("Error using {}: {}", self.gateway.provider(), msg);
                self.record(Role::Assistant, &notice);
                Err(ChatError::Generation(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// Forget the conversation in memory and on disk.
    pub fn clear(&mut self) {
        self.memory.clear();
        self.store.clear();
        tracing::info!("conversation cleared");
    }

    pub fn export_json(&self) -> Result<String, ChatError> {
        Ok(serde_json::to_string_pretty(&self.memory.as_messages())?)
    }

    pub fn export_to(&self, path: &Path) -> Result<(), ChatError> {
        std::fs::write(path, self.export_json()?)?;
        tracing::info!(path = %path.display(), "exported conversation");
        Ok(())
    }

    /// Replace the conversation with an externally supplied record list.
    /// Returns the number of turns kept after capping.
    pub fn import_json(&mut self, json: &str) -> Result<usize, ChatError> {
        let turns: Vec<Turn> = serde_json::from_str(json)?;
        self.memory.replace(turns);
        self.store.replace(self.memory.as_messages());
        tracing::info!(turns = self.memory.len(), "imported conversation");
        Ok(self.memory.len())
    }

    pub fn import_from(&mut self, path: &Path) -> Result<usize, ChatError> {
        let json = std::fs::read_to_string(path)?;
        self.import_json(&json)
    }
}

/// Timestamped default file name for exports, e.g.
/// `chat_export_20240101T120000.json`.
pub fn default_export_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%dT%H%M%S");
    PathBuf::from(format!("{}_{}.json", paths::EXPORT_PREFIX, stamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_export_path_shape() {
        let path = default_export_path();
        let name = path.to_string_lossy();
        assert!(name.starts_with("chat_export_"));
        assert!(name.ends_with(".json"));
        assert!(name.contains('T'));
    }
}
