use crate::context::history::Turn;

/// Build the exact text sent to the model for a chat turn.
///
/// Layout: each history turn as `"{Role}: {content}\n"` oldest first, then the
/// profile context verbatim, then `"Human: {message}\nAssistant:"`.
pub fn assemble(history: &[Turn], context: &str, message: &str) -> String {
    let mut prompt = String::new();

    for turn in history {
        prompt.push_str(turn.role.label());
        prompt.push_str(": ");
        prompt.push_str(&turn.content);
        prompt.push('\n');
    }

    prompt.push_str(context);
    prompt.push_str("Human: ");
    prompt.push_str(message);
    prompt.push_str("\nAssistant:");
    prompt
}

/// Render turns as `"{role}: {content}"` lines joined by newlines.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role, t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Instruction asking the model to condense `turns` into two sentences.
pub fn summary_prompt(turns: &[Turn]) -> String {
    format!(
        "Summarize this conversation in 2 sentences, focusing on:\n\
         - Key topics discussed\n\
         - Important user information\n\
         \n\
         Conversation:\n\
         {}\n\
         \n\
         Summary:",
        render_transcript(turns)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::history::Role;

    #[test]
    fn test_assemble_empty_history_and_context() {
        assert_eq!(assemble(&[], "", "hi"), "Human: hi\nAssistant:");
    }

    #[test]
    fn test_context_sits_between_history_and_message() {
        let history = vec![
            Turn::new(Role::System, "Previous conversation summary: s", None),
            Turn::new(Role::Human, "a", None),
            Turn::new(Role::Assistant, "b", None),
        ];
        let prompt = assemble(&history, "User's name: Ann. ", "c");
        assert_eq!(
            prompt,
            "System: Previous conversation summary: s\nHuman: a\nAssistant: b\n\
             User's name: Ann. Human: c\nAssistant:"
        );
    }

    #[test]
    fn test_summary_prompt_uses_lowercase_roles() {
        let turns = vec![
            Turn::new(Role::Human, "hello", None),
            Turn::new(Role::Assistant, "hey", None),
        ];
        let prompt = summary_prompt(&turns);
        assert!(prompt.starts_with("Summarize this conversation in 2 sentences"));
        assert!(prompt.contains("Conversation:\nhuman: hello\nassistant: hey\n\nSummary:"));
    }
}
