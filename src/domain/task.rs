use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Writing genre of a C1 Advanced task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum TaskType {
    #[default]
    #[serde(rename = "Essay")]
    #[strum(to_string = "Essay")]
    Essay,
    #[serde(rename = "Letter/Email")]
    #[strum(to_string = "Letter/Email", serialize = "letter", serialize = "email")]
    LetterEmail,
    #[serde(rename = "Proposal")]
    #[strum(to_string = "Proposal")]
    Proposal,
    #[serde(rename = "Report")]
    #[strum(to_string = "Report")]
    Report,
    #[serde(rename = "Review")]
    #[strum(to_string = "Review")]
    Review,
}

impl TaskType {
    pub const ALL: [TaskType; 5] = [
        TaskType::Essay,
        TaskType::LetterEmail,
        TaskType::Proposal,
        TaskType::Report,
        TaskType::Review,
    ];

    /// Exam paper label, e.g. "Part 2: Report".
    pub fn label(self) -> &'static str {
        match self {
            Self::Essay => "Part 1: Essay",
            Self::LetterEmail => "Part 2: Letter/Email",
            Self::Proposal => "Part 2: Proposal",
            Self::Report => "Part 2: Report",
            Self::Review => "Part 2: Review",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Essay => "Focus on discursive argument, weighing up two points.",
            Self::LetterEmail => "Response to a prompt, varying register (formal/informal).",
            Self::Proposal => "Persuasive, making recommendations for future action.",
            Self::Report => "Factual, evaluating past events/situations.",
            Self::Review => "Descriptive, evaluative, personal opinion/recommendation.",
        }
    }

    /// Form safe for use inside a file name.
    pub fn file_slug(self) -> String {
        self.to_string().replace('/', "-")
    }
}

/// A task as returned by the provider, before it is stamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub context: String,
    pub question: String,
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opinions: Option<Vec<String>>,
    pub instructions: String,
}

/// An immutable generated writing task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTask {
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub context: String,
    pub question: String,
    pub points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opinions: Option<Vec<String>>,
    pub instructions: String,
}

impl GeneratedTask {
    /// Give a provider draft its identity: fresh id, current instant, requested type.
    pub fn stamp(draft: TaskDraft, task_type: TaskType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            // Stored with millisecond precision.
            timestamp: DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now),
            task_type,
            context: draft.context,
            question: draft.question,
            points: draft.points,
            opinions: draft.opinions,
            instructions: draft.instructions,
        }
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// Task description handed to the improve and assess prompts.
pub fn task_context(task: Option<&GeneratedTask>, task_type: TaskType) -> String {
    task.and_then(|t| serde_json::to_string(t).ok())
        .unwrap_or_else(|| format!("Generic {task_type}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn draft() -> TaskDraft {
        TaskDraft {
            context: "Your class has discussed transport.".into(),
            question: "Which measure should the council take?".into(),
            points: vec!["cycle paths".into(), "bus lanes".into()],
            opinions: None,
            instructions: "Write your essay.".into(),
        }
    }

    #[test]
    fn task_type_serializes_with_exam_labels() {
        let json = serde_json::to_string(&TaskType::LetterEmail).unwrap();
        assert_eq!(json, "\"Letter/Email\"");
        let parsed: TaskType = serde_json::from_str("\"Review\"").unwrap();
        assert_eq!(parsed, TaskType::Review);
    }

    #[test]
    fn task_type_parses_aliases_case_insensitively() {
        assert_eq!(TaskType::from_str("essay").unwrap(), TaskType::Essay);
        assert_eq!(TaskType::from_str("EMAIL").unwrap(), TaskType::LetterEmail);
        assert_eq!(TaskType::from_str("letter/email").unwrap(), TaskType::LetterEmail);
        assert!(TaskType::from_str("poem").is_err());
    }

    #[test]
    fn file_slug_replaces_slash() {
        assert_eq!(TaskType::LetterEmail.file_slug(), "Letter-Email");
        assert_eq!(TaskType::Report.file_slug(), "Report");
    }

    #[test]
    fn stamp_assigns_distinct_ids_and_type() {
        let a = GeneratedTask::stamp(draft(), TaskType::Essay);
        let b = GeneratedTask::stamp(draft(), TaskType::Report);
        assert_ne!(a.id, b.id);
        assert_eq!(b.task_type, TaskType::Report);
        assert_eq!(a.short_id().len(), 8);
    }

    #[test]
    fn generated_task_json_uses_type_key_and_millis() {
        let task = GeneratedTask::stamp(draft(), TaskType::Essay);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["type"], "Essay");
        assert_eq!(value["timestamp"], task.timestamp.timestamp_millis());
        assert!(value.get("opinions").is_none());
    }

    #[test]
    fn context_falls_back_to_generic_label() {
        assert_eq!(task_context(None, TaskType::Proposal), "Generic Proposal");
        let task = GeneratedTask::stamp(draft(), TaskType::Essay);
        assert!(task_context(Some(&task), TaskType::Essay).contains("cycle paths"));
    }
}
