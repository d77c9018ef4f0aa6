use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{defaults, endpoints, models, paths};
use crate::error::ChatError;
use crate::llm::ProviderId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Kept as a raw string so an unrecognized value survives loading and is
    /// reported by the gateway instead of aborting startup.
    pub provider: String,
    pub chat: ChatSettings,
    pub huggingface: HuggingFaceSettings,
    pub openai: OpenAISettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatSettings {
    pub max_turns: usize,
    pub history_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HuggingFaceSettings {
    pub model: String,
    pub token_env: String,
    pub base_url: String,
    pub hub_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OpenAISettings {
    pub model: String,
    pub api_key_env: String,
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: defaults::PROVIDER.to_string(),
            chat: ChatSettings::default(),
            huggingface: HuggingFaceSettings::default(),
            openai: OpenAISettings::default(),
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            max_turns: defaults::MAX_TURNS,
            history_file: PathBuf::from(defaults::HISTORY_FILE),
        }
    }
}

impl Default for HuggingFaceSettings {
    fn default() -> Self {
        Self {
            model: models::DEFAULT_HF_MODEL.to_string(),
            token_env: defaults::HF_TOKEN_ENV.to_string(),
            base_url: endpoints::HF_INFERENCE_BASE_URL.to_string(),
            hub_url: endpoints::HF_HUB_URL.to_string(),
        }
    }
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            model: models::DEFAULT_OPENAI_MODEL.to_string(),
            api_key_env: defaults::OPENAI_API_KEY_ENV.to_string(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or unparseable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }
        match Self::try_load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring settings file: {e}");
                Self::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self, ChatError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ChatError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ChatError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ChatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ChatError> {
        if self.chat.max_turns < 1 {
            return Err(ChatError::Config(format!(
                "max_turns must be at least 1 (got {})",
                self.chat.max_turns
            )));
        }
        if self.chat.history_file.as_os_str().is_empty() {
            return Err(ChatError::Config("history_file must not be empty".into()));
        }
        Ok(())
    }

    /// The configured provider, or `None` when the value is not recognized.
    pub fn provider_id(&self) -> Option<ProviderId> {
        ProviderId::parse(&self.provider)
    }

    pub fn model_for(&self, provider: ProviderId) -> &str {
        match provider {
            ProviderId::HuggingFace => &self.huggingface.model,
            ProviderId::OpenAI => &self.openai.model,
        }
    }

    pub fn hf_token(&self) -> Option<String> {
        read_env(&self.huggingface.token_env)
    }

    pub fn openai_api_key(&self) -> Option<String> {
        read_env(&self.openai.api_key_env)
    }
}

/// Read a credential from the environment. Unset and empty both count as absent.
fn read_env(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
