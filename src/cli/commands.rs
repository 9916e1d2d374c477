use super::subcommands::{DraftCommands, HistoryCommands, ScoreCommands, TaskCommands};
use crate::assessment::ActiveView;
use crate::domain::{Subscale, TaskType};
use clap::{Parser, Subcommand};

/// `writewise` - C1 Advanced writing practice and assessment.
#[derive(Parser, Debug)]
#[command(name = "writewise")]
#[command(version)]
#[command(
    about = "Generate C1 Advanced writing tasks, improve drafts and score them against the exam rubric.",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show configuration and the current session
    Status,

    /// Show the task type, or switch to another (clears scores and feedback)
    Type {
        /// Essay, Letter/Email (letter, email), Proposal, Report or Review
        task_type: Option<TaskType>,
    },

    /// Generate, browse and load writing tasks
    Task {
        #[command(subcommand)]
        task_command: TaskCommands,
    },

    /// Edit the draft being worked on
    Draft {
        #[command(subcommand)]
        draft_command: DraftCommands,
    },

    /// Rewrite the draft at band 5 and list the key changes
    Improve,

    /// Score the draft against the four rubric subscales
    Assess,

    /// Inspect or hand-set subscale bands
    Score {
        #[command(subcommand)]
        score_command: ScoreCommands,
    },

    /// Print rubric descriptors
    Rubric {
        /// Limit output to one subscale
        #[arg(long)]
        subscale: Option<Subscale>,

        /// Show the descriptor that applies to this band (0-5)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=5))]
        band: Option<u8>,
    },

    /// Browse, delete and export past assessments
    History {
        #[command(subcommand)]
        history_command: HistoryCommands,
    },

    /// Show the draft or the improved version, optionally switching to it
    View {
        /// draft or improved
        view: Option<ActiveView>,
    },
}
