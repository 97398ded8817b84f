use crate::constants::{defaults, endpoints, models};
use crate::error::MemochatError;
use crate::llm::traits::TextGenerator;
use serde::{Deserialize, Serialize};

/// Client for OpenAI-compatible `/v1/chat/completions` servers.
///
/// The whole prompt is sent as a single user message.
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: models::DEFAULT_OPENAI_MODEL.to_string(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
            max_tokens: defaults::MAX_TOKENS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIRequestMessage<'a>>,
    max_tokens: u32,
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

impl OpenAIResponse {
    /// Content of the first choice, if it is non-empty.
    fn text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()?
            .message
            .content
            .filter(|text| !text.is_empty())
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAIClient {
    async fn generate(&self, prompt: &str) -> Result<String, MemochatError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let request_body = OpenAIRequest {
            model: &self.model,
            messages: vec![OpenAIRequestMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(MemochatError::Llm(format!(
                "OpenAI API error ({}): {}",
                status, response_text
            )));
        }

        let api_response: OpenAIResponse = serde_json::from_str(&response_text)
            .map_err(|e| MemochatError::Llm(format!("Failed to parse response: {e}")))?;

        api_response
            .text()
            .ok_or_else(|| MemochatError::Llm("No response from API".into()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
