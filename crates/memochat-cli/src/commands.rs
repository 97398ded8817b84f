use memochat_core::ProfileUpdate;

/// Result of interpreting one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Switch the active user.
    SetUser(String),
    /// Merge fields into the active profile.
    UpdateProfile(ProfileUpdate),
    /// Not a command - send as a chat turn.
    Chat(String),
    /// Blank line, nothing to do.
    Empty,
}

const QUIT_WORDS: &[&str] = &["quit", "exit", "bye"];

pub fn handle_command(input: &str) -> CommandResult {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return CommandResult::Empty;
    }

    if QUIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
        return CommandResult::Quit;
    }

    let (cmd, arg) = match trimmed.split_once(' ') {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (trimmed, ""),
    };

    match cmd {
        "help" if arg.is_empty() => show_help(),
        "set_user" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: set_user <id>".into())
            } else {
                CommandResult::SetUser(arg.to_string())
            }
        }
        "update_profile" => {
            if arg.is_empty() {
                CommandResult::Message(
                    "Usage: update_profile name=<name>,<key>=<value>[,...]".into(),
                )
            } else {
                CommandResult::UpdateProfile(parse_profile_args(arg))
            }
        }
        _ => CommandResult::Chat(trimmed.to_string()),
    }
}

/// Parse `key=value[,key=value...]` into a profile update.
///
/// `name` sets the profile name; every other key becomes a preference. Pairs
/// without `=` or with an empty key are skipped, an empty name is ignored,
/// and later pairs overwrite earlier ones.
pub fn parse_profile_args(args: &str) -> ProfileUpdate {
    let mut update = ProfileUpdate::new();

    for pair in args.split(',') {
        let Some((key, value)) = pair.trim().split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key.is_empty() {
            continue;
        }

        if key == "name" {
            if !value.is_empty() {
                update.name = Some(value.to_string());
            }
        } else {
            update
                .preferences
                .insert(key.to_string(), value.to_string());
        }
    }

    update
}

pub fn banner() -> String {
    format!(
        "Memochat v{} - stateful chatbot with auto-persistence\n\
         Commands: 'set_user <id>', 'update_profile name=<name>', 'help', 'quit'\n\
         {}",
        env!("CARGO_PKG_VERSION"),
        "-".repeat(60)
    )
}

fn show_help() -> CommandResult {
    CommandResult::Message(
        "Memochat Commands\n\
         \n\
         set_user <id>                         Switch to (or create) a user profile\n\
         update_profile name=<n>,<k>=<v>,...   Set your name and preferences\n\
         help                                  Show this help\n\
         quit | exit | bye                     Leave\n\
         \n\
         Anything else is sent to the assistant."
            .into(),
    )
}
