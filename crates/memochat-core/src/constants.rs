//! Centralized constants.
//! Window sizes, thresholds, endpoints and default names live here.

// ─── History Policy ───────────────────────────────────────────────────────────

pub mod history {
    /// Turns rendered into every chat prompt.
    pub const PROMPT_WINDOW: usize = 10;
    /// Turns written to the session file on save.
    pub const PERSIST_WINDOW: usize = 50;
    /// Compaction runs once the log holds at least this many turns.
    pub const COMPACTION_TRIGGER: usize = 20;
    /// Tail of the log handed to the summarizer.
    pub const SUMMARY_SOURCE_WINDOW: usize = 15;
    /// Most recent turns kept verbatim after the summary turn.
    pub const RETAINED_AFTER_SUMMARY: usize = 5;
    /// Prefix of the synthesized system turn.
    pub const SUMMARY_PREFIX: &str = "Previous conversation summary: ";
}

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
    pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
    pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-5-20250929";
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    pub const CLAUDE_BASE_URL: &str = "https://api.anthropic.com";
}

// ─── Default Settings ─────────────────────────────────────────────────────────

pub mod defaults {
    pub const MAX_TOKENS: u32 = 2048;
    pub const GEMINI_API_KEY_ENV: &str = "GOOGLE_API_KEY";
    pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
    pub const CLAUDE_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
    pub const SESSION_FILE_NAME: &str = "memochat_session.json";
    pub const CONFIG_DIR_NAME: &str = "memochat";
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}
