mod builder;
pub mod history;
pub mod persistence;
pub mod prompt;

pub use builder::build_context;
pub use history::{CompactionOutcome, HistoryLog, Role, Turn};
pub use persistence::{SessionFile, SessionStore};
pub use prompt::{assemble, summary_prompt};
