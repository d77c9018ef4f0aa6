use crate::config::Settings;
use crate::context::PromptAssembler;
use crate::error::ChatError;
use crate::llm::huggingface::HuggingFaceClient;
use crate::llm::openai::OpenAIClient;
use crate::llm::provider::ProviderId;
use crate::llm::traits::{InferenceBackend, Turn};

/// Builds a backend for a provider. Called at most once per successful
/// initialization of a [`ModelGateway`].
#[async_trait::async_trait]
pub trait BackendConnector: Send + Sync {
    async fn connect(
        &self,
        provider: ProviderId,
        settings: &Settings,
    ) -> Result<Box<dyn InferenceBackend>, ChatError>;
}

/// Default connector: constructs HTTP clients and performs credential login.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpConnector;

#[async_trait::async_trait]
impl BackendConnector for HttpConnector {
    async fn connect(
        &self,
        provider: ProviderId,
        settings: &Settings,
    ) -> Result<Box<dyn InferenceBackend>, ChatError> {
        let model = settings.model_for(provider).trim();
        if model.is_empty() {
            return Err(ChatError::Initialization(format!(
                "No model configured for provider '{}' (set [{}].model)",
                provider, provider
            )));
        }

        match provider {
            ProviderId::HuggingFace => {
                let hf = &settings.huggingface;
                let token = settings.hf_token();
                let has_token = token.is_some();
                let client = HuggingFaceClient::new(model)
                    .with_base_url(hf.base_url.as_str())
                    .with_token(token);

                if has_token {
                    let account = client.whoami(&hf.hub_url).await.map_err(|e| {
                        ChatError::Initialization(format!("Hugging Face login failed: {e}"))
                    })?;
                    tracing::info!(account = %account, "logged in to Hugging Face");
                } else {
                    tracing::debug!(env = %hf.token_env, "no Hugging Face token, using anonymous access");
                }

                tracing::info!(model = %model, "Hugging Face backend ready");
                Ok(Box::new(client))
            }
            ProviderId::OpenAI => {
                let api_key = settings.openai_api_key().ok_or_else(|| {
                    ChatError::Initialization(format!(
                        "No OpenAI API key found (set ${})",
                        settings.openai.api_key_env
                    ))
                })?;
                let client = OpenAIClient::new(api_key)
                    .with_model(model)
                    .with_base_url(settings.openai.base_url.as_str());

                tracing::info!(model = %model, "OpenAI client initialized");
                Ok(Box::new(client))
            }
        }
    }
}

/// Observable gateway lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayStatus {
    Uninitialized,
    Ready,
    Failed(String),
}

enum BackendState {
    Uninitialized,
    Ready(Box<dyn InferenceBackend>),
    Failed(String),
}

/// Owns the backend handle for a session and turns prompts into replies.
///
/// The backend is built on first use and reused afterwards. A failed
/// initialization is sticky: every later call reports the same
/// [`ChatError::Initialization`] until [`ModelGateway::reset`] is called.
pub struct ModelGateway {
    settings: Settings,
    connector: Box<dyn BackendConnector>,
    state: BackendState,
}

impl ModelGateway {
    pub fn new(settings: Settings) -> Self {
        Self::with_connector(settings, HttpConnector)
    }

    pub fn with_connector(settings: Settings, connector: impl BackendConnector + 'static) -> Self {
        Self {
            settings,
            connector: Box::new(connector),
            state: BackendState::Uninitialized,
        }
    }

    pub fn status(&self) -> GatewayStatus {
        match &self.state {
            BackendState::Uninitialized => GatewayStatus::Uninitialized,
            BackendState::Ready(_) => GatewayStatus::Ready,
            BackendState::Failed(msg) => GatewayStatus::Failed(msg.clone()),
        }
    }

    /// Raw configured provider value.
    pub fn provider(&self) -> &str {
        &self.settings.provider
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Forget a failed (or ready) backend so the next call initializes again.
    pub fn reset(&mut self) {
        self.state = BackendState::Uninitialized;
    }

    /// Build the backend if that has not happened yet.
    ///
    /// An unknown provider is not an initialization failure; it is reported
    /// by the generate calls instead.
    pub async fn initialize(&mut self) -> Result<(), ChatError> {
        match self.settings.provider_id() {
            Some(provider) => self.ensure_ready(provider).await,
            None => Ok(()),
        }
    }

    async fn ensure_ready(&mut self, provider: ProviderId) -> Result<(), ChatError> {
        match &self.state {
            BackendState::Ready(_) => return Ok(()),
            BackendState::Failed(msg) => return Err(ChatError::Initialization(msg.clone())),
            BackendState::Uninitialized => {}
        }

        tracing::debug!(provider = %provider, "initializing backend");
        match self.connector.connect(provider, &self.settings).await {
            Ok(backend) => {
                self.state = BackendState::Ready(backend);
                Ok(())
            }
            Err(e) => {
                let msg = match e {
                    ChatError::Initialization(msg) => msg,
                    other => other.to_string(),
                };
                tracing::error!(provider = %provider, "failed to initialize backend: {msg}");
                self.state = BackendState::Failed(msg.clone());
                Err(ChatError::Initialization(msg))
            }
        }
    }

    /// Flatten `turns` into a prompt and generate a reply.
    pub async fn generate_from_turns(&mut self, turns: &[Turn]) -> Result<String, ChatError> {
        let prompt = PromptAssembler::to_prompt(turns);
        self.generate_from_text(&prompt).await
    }

    /// Generate a reply for a ready-made prompt.
    ///
    /// Returns `Ok("Unknown provider: ...")` when the configured provider is
    /// not recognized, so a render loop never has to handle that case.
    pub async fn generate_from_text(&mut self, prompt: &str) -> Result<String, ChatError> {
        let Some(provider) = self.settings.provider_id() else {
            tracing::warn!(provider = %self.settings.provider, "unknown provider");
            return Ok(format!("Unknown provider: {}", self.settings.provider));
        };

        self.ensure_ready(provider).await?;
        let backend = match &self.state {
            BackendState::Ready(backend) => backend,
            _ => {
                return Err(ChatError::Initialization(format!(
                    "{} backend is not ready",
                    provider
                )))
            }
        };

        let raw = backend.complete(prompt).await.map_err(|e| {
            let msg = match e {
                ChatError::Generation(msg) => msg,
                other => other.to_string(),
            };
            tracing::error!(provider = %provider, "chat error: {msg}");
            ChatError::Generation(msg)
        })?;

        tracing::debug!(provider = %backend.name(), chars = raw.len(), "received completion");
        Ok(normalize_reply(prompt, &raw))
    }
}

/// Strip an echoed prompt from a raw completion, then trim whitespace.
pub fn normalize_reply(prompt: &str, raw: &str) -> String {
    match raw.strip_prefix(prompt) {
        Some(rest) => rest.trim().to_string(),
        None => raw.trim().to_string(),
    }
}
