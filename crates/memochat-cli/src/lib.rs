// Library interface for memochat-cli.
// Lets integration tests drive command parsing and the line handler.

pub mod app;
pub mod commands;

pub use commands::{handle_command, parse_profile_args, CommandResult};
