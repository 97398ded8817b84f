use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::constants::{defaults, models};
use crate::context::SessionStore;
use crate::error::MemochatError;
use crate::llm::{ClaudeClient, GeminiClient, OpenAIClient, TextGenerator};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key_env: String,
    pub base_url: Option<String>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    OpenAI,
    Claude,
}

impl LlmProvider {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "gemini" | "google" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAI),
            "claude" | "anthropic" => Some(Self::Claude),
            _ => None,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => models::DEFAULT_GEMINI_MODEL,
            Self::OpenAI => models::DEFAULT_OPENAI_MODEL,
            Self::Claude => models::DEFAULT_CLAUDE_MODEL,
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Self::Gemini => defaults::GEMINI_API_KEY_ENV,
            Self::OpenAI => defaults::OPENAI_API_KEY_ENV,
            Self::Claude => defaults::CLAUDE_API_KEY_ENV,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self::for_provider(LlmProvider::Gemini)
    }
}

impl LlmSettings {
    /// Defaults for `provider`: its default model and credential variable.
    pub fn for_provider(provider: LlmProvider) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            api_key_env: provider.default_api_key_env().to_string(),
            base_url: None,
            max_tokens: defaults::MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Session file location. Defaults to `memochat_session.json` in the
    /// working directory.
    pub path: Option<PathBuf>,
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(defaults::CONFIG_DIR_NAME)
            .join(defaults::CONFIG_FILE_NAME)
    }

    /// Load from the default config path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`. A missing file yields defaults; an unreadable or
    /// malformed one yields defaults and a warning.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), MemochatError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| MemochatError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Switch provider, resetting model and credential variable to that
    /// provider's defaults.
    pub fn set_provider(&mut self, provider: LlmProvider) {
        if self.llm.provider != provider {
            let base_url = self.llm.base_url.take();
            let max_tokens = self.llm.max_tokens;
            self.llm = LlmSettings::for_provider(provider);
            self.llm.base_url = base_url;
            self.llm.max_tokens = max_tokens;
        }
    }

    /// Get the API key from the environment variable named in settings.
    /// Unset and empty values both count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.llm.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn session_store(&self) -> SessionStore {
        match self.session.path {
            Some(ref path) => SessionStore::new(path.clone()),
            None => SessionStore::default(),
        }
    }

    /// Build the text generator for the configured provider.
    ///
    /// Fails with `MissingCredential` when the API key is not available.
    pub fn build_generator(&self) -> Result<Box<dyn TextGenerator>, MemochatError> {
        let api_key = self
            .api_key()
            .ok_or_else(|| MemochatError::missing_credential(&self.llm.api_key_env))?;

        let generator: Box<dyn TextGenerator> = match self.llm.provider {
            LlmProvider::Gemini => {
                let mut client = GeminiClient::new(api_key)
                    .with_model(&self.llm.model)
                    .with_max_tokens(self.llm.max_tokens);
                if let Some(ref url) = self.llm.base_url {
                    client = client.with_base_url(url);
                }
                Box::new(client)
            }
            LlmProvider::OpenAI => {
                let mut client = OpenAIClient::new(api_key)
                    .with_model(&self.llm.model)
                    .with_max_tokens(self.llm.max_tokens);
                if let Some(ref url) = self.llm.base_url {
                    client = client.with_base_url(url);
                }
                Box::new(client)
            }
            LlmProvider::Claude => {
                let mut client = ClaudeClient::new(api_key)
                    .with_model(&self.llm.model)
                    .with_max_tokens(self.llm.max_tokens);
                if let Some(ref url) = self.llm.base_url {
                    client = client.with_base_url(url);
                }
                Box::new(client)
            }
        };

        Ok(generator)
    }
}
