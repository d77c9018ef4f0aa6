use crate::constants::{endpoints, models, sampling};
use crate::error::ChatError;
use crate::llm::traits::InferenceBackend;
use serde::{Deserialize, Serialize};

/// Chat-completion client. The whole assembled prompt travels as a single
/// user message; history is never threaded as separate messages.
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: models::DEFAULT_OPENAI_MODEL.to_string(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
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
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIRequestMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct OpenAIRequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[async_trait::async_trait]
impl InferenceBackend for OpenAIClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ChatError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let request_body = OpenAIRequest {
            model: &self.model,
            messages: vec![OpenAIRequestMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: sampling::MAX_NEW_TOKENS,
            temperature: sampling::TEMPERATURE,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ChatError::Generation(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| ChatError::Generation(e.to_string()))?;

        if !status.is_success() {
            return Err(ChatError::Generation(format!(
                "OpenAI API error ({}): {}",
                status, response_text
            )));
        }

        let api_response: OpenAIResponse = serde_json::from_str(&response_text)
            .map_err(|e| ChatError::Generation(format!("Failed to parse response: {e}")))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::Generation("No response from API".into()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}
