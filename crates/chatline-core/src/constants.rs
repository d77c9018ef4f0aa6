//! Centralized constants: defaults, endpoints and sampling parameters.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    /// Lightweight conversational model served by the hosted inference API
    pub const DEFAULT_HF_MODEL: &str = "microsoft/DialoGPT-medium";
    pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const HF_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";
    pub const HF_HUB_URL: &str = "https://huggingface.co";
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
}

// ─── Default Settings ─────────────────────────────────────────────────────────

pub mod defaults {
    pub const PROVIDER: &str = "huggingface";
    pub const MAX_TURNS: usize = 5;
    pub const HISTORY_FILE: &str = "chat_history.json";
    pub const HF_TOKEN_ENV: &str = "HF_TOKEN";
    pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
    pub const LOG_FILE: &str = "chatbot.log";
}

// ─── Sampling ─────────────────────────────────────────────────────────────────

pub mod sampling {
    pub const MAX_NEW_TOKENS: u32 = 300;
    pub const TEMPERATURE: f32 = 0.7;
    pub const TOP_P: f32 = 0.9;
    pub const REPETITION_PENALTY: f32 = 1.1;
}

// ─── Config Paths ─────────────────────────────────────────────────────────────

pub mod paths {
    pub const CONFIG_DIR: &str = "chatline";
    pub const CONFIG_FILE: &str = "config.toml";
    pub const EXPORT_PREFIX: &str = "chat_export";
}
