use crate::constants::history::{
    COMPACTION_TRIGGER, RETAINED_AFTER_SUMMARY, SUMMARY_PREFIX, SUMMARY_SOURCE_WINDOW,
};
use crate::context::prompt::summary_prompt;
use crate::error::MemochatError;
use crate::llm::TextGenerator;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Assistant,
    System,
}

impl Role {
    /// Lowercase name, as persisted and as used in summary transcripts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Human => "human",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    /// Capitalized name used as the line label in chat prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Human => "Human",
            Role::Assistant => "Assistant",
            Role::System => "System",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>, timestamp: Option<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// A human turn stamped with the current time.
    pub fn human(content: impl Into<String>) -> Self {
        Self::new(Role::Human, content, Some(now_timestamp()))
    }

    /// An assistant turn stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content, Some(now_timestamp()))
    }

    /// The synthesized turn that replaces compacted history. Carries no timestamp.
    pub fn summary(summary: &str) -> Self {
        Self::new(Role::System, format!("{SUMMARY_PREFIX}{summary}"), None)
    }
}

/// Current time as an RFC 3339 string.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// What a call to [`HistoryLog::compact_if_needed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactionOutcome {
    /// The log was below the trigger length and was left alone.
    NotNeeded,
    /// The log was replaced with a summary turn plus `retained` recent turns.
    Compacted { summarized: usize, retained: usize },
}

/// Ordered conversation transcript. Insertion order is conversational order.
///
/// After a compaction the log starts with a single system summary turn
/// followed by the most recent turns verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    turns: Vec<Turn>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// The last `n` turns in order, or the whole log if it is shorter.
    pub fn windowed(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn needs_compaction(&self) -> bool {
        self.turns.len() >= COMPACTION_TRIGGER
    }

    /// Summarize the recent tail of the log once it reaches the trigger length.
    ///
    /// The last [`SUMMARY_SOURCE_WINDOW`] turns are sent to `generator`; on
    /// success the log becomes `[summary, <last 5 of that same window>]`.
    /// On failure the log is untouched and a `Summarization` error is returned.
    pub async fn compact_if_needed(
        &mut self,
        generator: &dyn TextGenerator,
    ) -> Result<CompactionOutcome, MemochatError> {
        if !self.needs_compaction() {
            return Ok(CompactionOutcome::NotNeeded);
        }

        let source = self.windowed(SUMMARY_SOURCE_WINDOW).to_vec();
        let prompt = summary_prompt(&source);
        debug!(turns = source.len(), prompt_len = prompt.len(), "Requesting summary");

        let summary = generator
            .generate(&prompt)
            .await
            .map_err(|e| MemochatError::Summarization(e.to_string()))?;

        let summarized = self.turns.len();
        let keep_from = source.len().saturating_sub(RETAINED_AFTER_SUMMARY);
        let mut compacted = Vec::with_capacity(1 + RETAINED_AFTER_SUMMARY);
        compacted.push(Turn::summary(summary.trim()));
        compacted.extend(source.into_iter().skip(keep_from));

        let retained = compacted.len() - 1;
        self.turns = compacted;
        info!(summarized, retained, "Conversation summarized");

        Ok(CompactionOutcome::Compacted {
            summarized,
            retained,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoSummary;

    #[async_trait::async_trait]
    impl TextGenerator for EchoSummary {
        async fn generate(&self, _prompt: &str) -> Result<String, MemochatError> {
            Ok("  They talked about Rust.\n".to_string())
        }
    }

    fn log_of(n: usize) -> HistoryLog {
        let mut log = HistoryLog::new();
        for i in 0..n {
            let role = if i % 2 == 0 { Role::Human } else { Role::Assistant };
            log.append(Turn::new(role, format!("m{i}"), None));
        }
        log
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Human.as_str(), "human");
        assert_eq!(Role::System.label(), "System");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn test_windowed_shorter_than_log() {
        let log = log_of(3);
        assert_eq!(log.windowed(10).len(), 3);
        assert_eq!(log.windowed(2)[0].content, "m1");
        assert!(log.windowed(0).is_empty());
    }

    #[test]
    fn test_turn_serialization_omits_missing_timestamp() {
        let json = serde_json::to_value(Turn::summary("x")).unwrap();
        assert_eq!(json["role"], "system");
        assert!(json.get("timestamp").is_none());
    }

    #[tokio::test]
    async fn test_summary_is_trimmed_and_prefixed() {
        let mut log = log_of(20);
        log.compact_if_needed(&EchoSummary).await.unwrap();
        assert_eq!(
            log.turns()[0].content,
            "Previous conversation summary: They talked about Rust."
        );
        assert!(log.turns()[0].timestamp.is_none());
    }
}
