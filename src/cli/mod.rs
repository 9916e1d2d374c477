pub mod commands;
mod subcommands;

pub use commands::{Cli, Commands};
pub use subcommands::{DraftCommands, HistoryCommands, ScoreCommands, TaskCommands};
