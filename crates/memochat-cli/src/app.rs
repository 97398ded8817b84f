use anyhow::Result;
use memochat_core::{ChatOrchestrator, MemochatError, Settings};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::{banner, handle_command, CommandResult};

/// What the caller should do after one line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Build the orchestrator from settings.
///
/// A missing credential fails here, before any session file is read.
pub fn build_orchestrator(settings: &Settings) -> Result<ChatOrchestrator, MemochatError> {
    let generator = settings.build_generator()?;
    Ok(ChatOrchestrator::new(settings.session_store(), generator))
}

/// Handle one line of input, printing whatever the user should see.
pub async fn handle_line(bot: &mut ChatOrchestrator, line: &str) -> Flow {
    let (flow, output) = process_line(bot, line).await;
    for text in output {
        println!("{text}");
    }
    flow
}

/// Apply one line of input and return the lines to show.
pub async fn process_line(bot: &mut ChatOrchestrator, line: &str) -> (Flow, Vec<String>) {
    let output = match handle_command(line) {
        CommandResult::Empty => Vec::new(),
        CommandResult::Quit => return (Flow::Quit, vec!["Goodbye!".to_string()]),
        CommandResult::Message(msg) => vec![msg],
        CommandResult::SetUser(id) => {
            bot.set_user(id.clone());
            vec![format!("User set to: {id}")]
        }
        CommandResult::UpdateProfile(update) => match bot.update_profile(update) {
            Ok(()) => vec!["Profile updated".to_string()],
            Err(e) => vec![e.to_string()],
        },
        CommandResult::Chat(message) => {
            let response = bot.chat(&message).await;
            vec![format!("Bot: {response}")]
        }
    };
    (Flow::Continue, output)
}

pub async fn run_single_prompt(settings: &Settings, prompt: &str) -> Result<()> {
    let mut bot = build_orchestrator(settings)?;
    let response = bot.chat(prompt).await;
    println!("{response}");
    Ok(())
}

pub async fn run_repl(settings: &Settings) -> Result<()> {
    let mut bot = build_orchestrator(settings)?;

    println!("{}", banner());
    if let Some(user) = bot.session().active_user() {
        println!("Loaded session for user: {user}");
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("\nYou: ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if handle_line(&mut bot, &line).await == Flow::Quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C detected. Type 'quit' to exit.");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
