use crate::error::MemochatError;

/// The remote text-generation collaborator.
///
/// The engine only ever sends one flat prompt and expects one block of text
/// back. There is no streaming and no timeout: the call either returns or
/// fails, and the caller waits for it.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, MemochatError>;

    /// Short human-readable name, used in logs.
    fn name(&self) -> &str {
        "generator"
    }
}

