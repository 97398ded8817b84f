use crate::constants::{defaults, endpoints, models};
use crate::error::MemochatError;
use crate::llm::traits::TextGenerator;
use serde::Deserialize;

pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: models::DEFAULT_CLAUDE_MODEL.to_string(),
            base_url: endpoints::CLAUDE_BASE_URL.to_string(),
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

    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{
                "role": "user",
                "content": prompt,
            }],
        })
    }
}

#[derive(Debug, Deserialize)]
struct ClaudeApiResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

impl ClaudeApiResponse {
    /// Text blocks joined in order; `None` when there are none or all are empty.
    fn text(&self) -> Option<String> {
        let text: String = self
            .content
            .iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text.as_str())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for ClaudeClient {
    async fn generate(&self, prompt: &str) -> Result<String, MemochatError> {
        let url = format!("{}/v1/messages", self.base_url);
        let request_body = self.build_request_body(prompt);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(MemochatError::Llm(format!(
                "Claude API error ({}): {}",
                status, response_text
            )));
        }

        let api_response: ClaudeApiResponse = serde_json::from_str(&response_text)
            .map_err(|e| MemochatError::Llm(format!("Failed to parse response: {e}")))?;

        api_response
            .text()
            .ok_or_else(|| MemochatError::Llm("No response from API".into()))
    }

    fn name(&self) -> &str {
        "claude"
    }
}
