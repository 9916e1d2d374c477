use crate::domain::{Subscale, TaskType};
use crate::export::ExportFormat;
use clap::Subcommand;
use std::path::PathBuf;

/// Task library subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TaskCommands {
    /// Ask the model for a new task and make it active
    Generate {
        /// Task type to generate (defaults to the current one)
        #[arg(long = "type")]
        task_type: Option<TaskType>,
    },
    /// List saved tasks, newest first
    List,
    /// Show a task in full (defaults to the active one)
    Show {
        /// Task id or unique prefix
        id: Option<String>,
    },
    /// Make a saved task active; clears the draft and scores
    Load {
        /// Task id or unique prefix
        id: String,
        /// Discard a non-trivial draft without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove a task from the library
    Delete {
        /// Task id or unique prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Draft subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DraftCommands {
    /// Replace the draft. Reads stdin when neither TEXT nor --file is given
    Set {
        text: Option<String>,
        /// Read the draft from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Print the draft with its word count
    Show,
    /// Empty the draft
    Clear,
}

/// Score subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ScoreCommands {
    /// Set one subscale band by hand
    Set {
        /// content, communicative, organisation or language
        subscale: Subscale,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        band: u8,
    },
    /// Show current bands with their rubric descriptors
    Show,
}

/// Assessment history subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum HistoryCommands {
    /// List recorded assessments, newest first
    List,
    /// Show one assessment in full
    Show {
        /// Entry id or unique prefix
        id: String,
    },
    /// Remove an assessment from history
    Delete {
        /// Entry id or unique prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write an assessment to a document (defaults to the newest)
    Export {
        /// Entry id or unique prefix
        id: Option<String>,
        /// docx or markdown
        #[arg(long, default_value_t = ExportFormat::Docx)]
        format: ExportFormat,
        /// Output directory (defaults to [export] directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
