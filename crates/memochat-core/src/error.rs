use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemochatError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: set {env_var} in your environment or .env file")]
    MissingCredential { env_var: String },

    #[error("No user set")]
    NoActiveUser,

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl MemochatError {
    pub fn missing_credential(env_var: impl Into<String>) -> Self {
        Self::MissingCredential {
            env_var: env_var.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MemochatError>;
