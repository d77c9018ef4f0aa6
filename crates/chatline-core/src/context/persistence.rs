use crate::error::ChatError;
use crate::llm::{Role, Turn};
use std::fs;
use std::path::{Path, PathBuf};

/// Durable conversation log backed by a JSON list of `{role, content}`
/// records.
///
/// Every failure is logged and swallowed: reads degrade to an empty log and
/// writes leave the previous file in place. The file is not protected
/// against concurrent writers.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_turns: usize,
}

impl HistoryStore {
    /// Open the store at `path`, creating an empty list if the file is absent.
    pub fn initialize(path: impl Into<PathBuf>, max_turns: usize) -> Self {
        let store = Self {
            path: path.into(),
            max_turns,
        };
        if !store.path.exists() {
            if let Err(e) = store.write(&[]) {
                tracing::warn!(path = %store.path.display(), "could not create history file: {e}");
            }
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Read the persisted log. Missing or corrupt files yield an empty log.
    pub fn load(&self) -> Vec<Turn> {
        match self.read() {
            Ok(turns) => turns,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "could not load history: {e}");
                Vec::new()
            }
        }
    }

    /// Append one turn, keeping only the most recent `2 × max_turns` entries.
    pub fn append(&self, role: Role, content: impl Into<String>) {
        let mut turns = self.load();
        turns.push(Turn::new(role, content));
        self.save(truncate(turns, self.max_turns));
    }

    /// Overwrite the file with `turns`, capped like [`HistoryStore::append`].
    pub fn replace(&self, turns: Vec<Turn>) {
        self.save(truncate(turns, self.max_turns));
    }

    pub fn clear(&self) {
        self.save(Vec::new());
    }

    fn save(&self, turns: Vec<Turn>) {
        if let Err(e) = self.write(&turns) {
            tracing::warn!(path = %self.path.display(), "could not save history: {e}");
        }
    }

    fn read(&self) -> Result<Vec<Turn>, ChatError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            ChatError::Persistence(format!("Failed to read history file: {}", e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            ChatError::Persistence(format!("Failed to parse history file: {}", e))
        })
    }

    fn write(&self, turns: &[Turn]) -> Result<(), ChatError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ChatError::Persistence(format!("Failed to create history directory: {}", e))
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(turns).map_err(|e| {
            ChatError::Persistence(format!("Failed to serialize history: {}", e))
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents).map_err(|e| {
            ChatError::Persistence(format!("Failed to write temporary history file: {}", e))
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            ChatError::Persistence(format!("Failed to rename history file: {}", e))
        })?;

        Ok(())
    }
}

/// Keep the most recent `2 × max_turns` entries.
fn truncate(mut turns: Vec<Turn>, max_turns: usize) -> Vec<Turn> {
    let cap = max_turns.saturating_mul(2);
    if turns.len() > cap {
        turns.drain(..turns.len() - cap);
    }
    turns
}
