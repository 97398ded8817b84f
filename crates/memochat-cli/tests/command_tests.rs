use memochat_cli::app::{process_line, Flow};
use memochat_cli::commands::{handle_command, parse_profile_args, CommandResult};
use memochat_core::{ChatOrchestrator, MemochatError, ProfileUpdate, SessionStore, TextGenerator};
use tempfile::TempDir;

// ========================================================================
// Command Parsing Tests (commands.rs)
// ========================================================================

#[test]
fn test_quit_words() {
    for word in ["quit", "exit", "bye", "QUIT", "Bye", "  exit  "] {
        assert_eq!(handle_command(word), CommandResult::Quit, "{word}");
    }
}

#[test]
fn test_quit_word_inside_sentence_is_chat() {
    assert_eq!(
        handle_command("bye for now"),
        CommandResult::Chat("bye for now".to_string())
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(handle_command(""), CommandResult::Empty);
    assert_eq!(handle_command("   "), CommandResult::Empty);
}

#[test]
fn test_set_user_command() {
    assert_eq!(
        handle_command("set_user alice"),
        CommandResult::SetUser("alice".to_string())
    );
    assert_eq!(
        handle_command("set_user   bob  "),
        CommandResult::SetUser("bob".to_string())
    );
}

#[test]
fn test_set_user_without_id_shows_usage() {
    match handle_command("set_user") {
        CommandResult::Message(msg) => assert!(msg.contains("Usage: set_user")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_update_profile_command() {
    let expected = ProfileUpdate::new()
        .with_name("Ann")
        .with_preference("lang", "en");
    assert_eq!(
        handle_command("update_profile name=Ann, lang=en"),
        CommandResult::UpdateProfile(expected)
    );
}

#[test]
fn test_update_profile_without_args_shows_usage() {
    assert!(matches!(
        handle_command("update_profile"),
        CommandResult::Message(_)
    ));
}

#[test]
fn test_help_command() {
    match handle_command("help") {
        CommandResult::Message(msg) => {
            assert!(msg.contains("set_user"));
            assert!(msg.contains("update_profile"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_help_followed_by_text_is_chat() {
    assert_eq!(
        handle_command("help me write a poem"),
        CommandResult::Chat("help me write a poem".to_string())
    );
}

#[test]
fn test_plain_text_is_chat() {
    assert_eq!(
        handle_command("What's the weather like?"),
        CommandResult::Chat("What's the weather like?".to_string())
    );
}

// ========================================================================
// Profile Argument Parsing
// ========================================================================

#[test]
fn test_parse_profile_args_splits_name_and_preferences() {
    let update = parse_profile_args("name=Ann,lang=en,tone=casual");
    assert_eq!(update.name.as_deref(), Some("Ann"));
    let keys: Vec<_> = update.preferences.keys().cloned().collect();
    assert_eq!(keys, vec!["lang", "tone"]);
}

#[test]
fn test_parse_profile_args_skips_malformed_pairs() {
    let update = parse_profile_args("garbage, =x, color=blue");
    assert!(update.name.is_none());
    assert_eq!(update.preferences.len(), 1);
    assert_eq!(
        update.preferences.get("color").map(String::as_str),
        Some("blue")
    );
}

#[test]
fn test_parse_profile_args_keeps_equals_in_value() {
    let update = parse_profile_args("formula=a=b");
    assert_eq!(
        update.preferences.get("formula").map(String::as_str),
        Some("a=b")
    );
}

#[test]
fn test_parse_profile_args_later_pairs_win() {
    let update = parse_profile_args("name=A,lang=en,name=B,lang=de");
    assert_eq!(update.name.as_deref(), Some("B"));
    assert_eq!(update.preferences.get("lang").map(String::as_str), Some("de"));
}

#[test]
fn test_parse_profile_args_ignores_empty_name() {
    let update = parse_profile_args("name=");
    assert!(update.is_empty());
}

// ========================================================================
// Line Handling (app.rs)
// ========================================================================

struct FixedReply(&'static str);

#[async_trait::async_trait]
impl TextGenerator for FixedReply {
    async fn generate(&self, _prompt: &str) -> Result<String, MemochatError> {
        Ok(self.0.to_string())
    }
}

struct AlwaysFails;

#[async_trait::async_trait]
impl TextGenerator for AlwaysFails {
    async fn generate(&self, _prompt: &str) -> Result<String, MemochatError> {
        Err(MemochatError::Llm("service unavailable".into()))
    }
}

fn bot_in(dir: &TempDir, generator: Box<dyn TextGenerator>) -> ChatOrchestrator {
    ChatOrchestrator::new(SessionStore::new(dir.path().join("session.json")), generator)
}

#[tokio::test]
async fn test_session_flow_through_lines() {
    let dir = TempDir::new().unwrap();
    let mut bot = bot_in(&dir, Box::new(FixedReply("Hi Ann!")));

    let (flow, out) = process_line(&mut bot, "update_profile name=Ann").await;
    assert_eq!(flow, Flow::Continue);
    assert_eq!(out, vec!["No user set".to_string()]);

    let (_, out) = process_line(&mut bot, "set_user ann").await;
    assert_eq!(out, vec!["User set to: ann".to_string()]);

    let (_, out) = process_line(&mut bot, "update_profile name=Ann,lang=en").await;
    assert_eq!(out, vec!["Profile updated".to_string()]);
    assert_eq!(
        bot.session().context(),
        "User's name: Ann. Preferences: lang: en. "
    );

    let (_, out) = process_line(&mut bot, "hello").await;
    assert_eq!(out, vec!["Bot: Hi Ann!".to_string()]);
    assert_eq!(bot.session().history.len(), 2);

    let (flow, out) = process_line(&mut bot, "bye").await;
    assert_eq!(flow, Flow::Quit);
    assert_eq!(out, vec!["Goodbye!".to_string()]);
}

#[tokio::test]
async fn test_chat_failure_is_shown_as_error_text() {
    let dir = TempDir::new().unwrap();
    let mut bot = bot_in(&dir, Box::new(AlwaysFails));

    let (flow, out) = process_line(&mut bot, "hi").await;

    assert_eq!(flow, Flow::Continue);
    assert_eq!(
        out,
        vec!["Bot: Error: LLM error: service unavailable".to_string()]
    );
    assert!(bot.session().history.is_empty());
}

#[tokio::test]
async fn test_blank_line_does_nothing() {
    let dir = TempDir::new().unwrap();
    let mut bot = bot_in(&dir, Box::new(FixedReply("unused")));

    let (flow, out) = process_line(&mut bot, "   ").await;

    assert_eq!(flow, Flow::Continue);
    assert!(out.is_empty());
    assert!(!bot.store().path().exists());
}
