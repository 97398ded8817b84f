pub mod chat;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod llm;
pub mod profile;
pub mod session;

// Re-export key types
pub use chat::ChatOrchestrator;
pub use config::{LlmProvider, Settings};
pub use context::{CompactionOutcome, HistoryLog, Role, SessionStore, Turn};
pub use error::MemochatError;
pub use llm::TextGenerator;
pub use profile::{Profile, ProfileStore, ProfileUpdate};
pub use session::Session;
