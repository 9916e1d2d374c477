//! Exporting a recorded assessment to a document on disk.

pub mod document;
pub mod docx;
pub mod markdown;

pub use document::{Block, ExportDocument};
pub use docx::{to_docx_bytes, write_docx};
pub use markdown::render_markdown;

use crate::domain::{HistoryEntry, TaskType};
use crate::error::ExportError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Docx,
    #[strum(to_string = "markdown", serialize = "md")]
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Markdown => "md",
        }
    }
}

/// `{prefix}_{taskType}_{YYYY-MM-DD}.{ext}`, with `/` in the task type
/// replaced by `-`.
pub fn file_name(
    prefix: &str,
    task_type: TaskType,
    timestamp: DateTime<Utc>,
    format: ExportFormat,
) -> String {
    format!(
        "{prefix}_{}_{}.{}",
        task_type.file_slug(),
        timestamp.format("%Y-%m-%d"),
        format.extension()
    )
}

pub fn render(entry: &HistoryEntry, format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let doc = ExportDocument::from_entry(entry);
    match format {
        ExportFormat::Docx => to_docx_bytes(&doc),
        ExportFormat::Markdown => Ok(render_markdown(&doc).into_bytes()),
    }
}

/// Write `entry` into `dir` and return the path of the new file.
pub async fn export_entry(
    entry: &HistoryEntry,
    format: ExportFormat,
    dir: &Path,
    prefix: &str,
) -> Result<PathBuf, ExportError> {
    let bytes = render(entry, format)?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name(prefix, entry.task_type, entry.timestamp, format));
    tokio::fs::write(&path, bytes).await?;
    tracing::info!(path = %path.display(), %format, entry = entry.id, "assessment exported");
    Ok(path)
}
