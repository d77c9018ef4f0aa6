use crate::constants::{endpoints, sampling};
use crate::error::ChatError;
use crate::llm::traits::InferenceBackend;
use serde::{Deserialize, Serialize};

/// Client for the hosted text-generation endpoint.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    model: String,
    token: Option<String>,
    base_url: String,
    parameters: GenerationParameters,
}

/// Sampling parameters sent with every completion request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: sampling::MAX_NEW_TOKENS,
            do_sample: true,
            temperature: sampling::TEMPERATURE,
            top_p: sampling::TOP_P,
            repetition_penalty: sampling::REPETITION_PENALTY,
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParameters,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CompletionResponse {
    Batch(Vec<Generation>),
    Single(Generation),
}

#[derive(Debug, Deserialize)]
struct WhoAmI {
    name: String,
}

impl HuggingFaceClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            token: None,
            base_url: endpoints::HF_INFERENCE_BASE_URL.to_string(),
            parameters: GenerationParameters::default(),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Validate the configured token against the hub and return the account name.
    pub async fn whoami(&self, hub_url: &str) -> Result<String, ChatError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ChatError::Initialization("No Hugging Face token configured".into()))?;

        let url = format!("{}/api/whoami-v2", hub_url.trim_end_matches('/'));
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::Initialization(format!(
                "Hugging Face login rejected ({}): {}",
                status, body
            )));
        }

        let account: WhoAmI = serde_json::from_str(&body)?;
        Ok(account.name)
    }
}

#[async_trait::async_trait]
impl InferenceBackend for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        let url = format!("{}/models/{}", self.base_url, self.model);
        let body = CompletionRequest {
            inputs: prompt,
            parameters: &self.parameters,
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Generation(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ChatError::Generation(e.to_string()))?;

        if !status.is_success() {
            return Err(ChatError::Generation(format!(
                "Hugging Face API error ({}): {}",
                status, text
            )));
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ChatError::Generation(format!("Failed to parse response: {e}")))?;

        let generation = match parsed {
            CompletionResponse::Single(generation) => generation,
            CompletionResponse::Batch(batch) => batch
                .into_iter()
                .next()
                .ok_or_else(|| ChatError::Generation("No generation returned".into()))?,
        };

        Ok(generation.generated_text)
    }
}
