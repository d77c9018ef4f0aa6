use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    /// History file unreadable, unwritable or corrupt. Recovered inside the
    /// store; only ever logged.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Backend client or model construction failed.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// A single request to an initialized backend failed.
    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    pub fn is_initialization(&self) -> bool {
        matches!(self, Self::Initialization(_))
    }

    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_))
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
