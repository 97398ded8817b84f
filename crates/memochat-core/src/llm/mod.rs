mod traits;
mod claude;
mod gemini;
mod openai;

pub use traits::*;
pub use claude::ClaudeClient;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
