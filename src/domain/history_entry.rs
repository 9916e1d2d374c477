use super::feedback::{Assessment, AssessmentFeedback};
use super::scores::ScoreState;
use super::task::{GeneratedTask, TaskType};
use super::word_count::word_count;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of one completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Creation instant in epoch milliseconds, bumped when it would collide.
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub task_type: TaskType,
    pub generated_task: Option<GeneratedTask>,
    pub student_text: String,
    pub scores: ScoreState,
    pub feedback: AssessmentFeedback,
    pub word_count: usize,
}

impl HistoryEntry {
    /// Record `assessment` of `student_text`. `newest_id` is the id at the
    /// front of the existing history, if any.
    pub fn record(
        now: DateTime<Utc>,
        newest_id: Option<i64>,
        task_type: TaskType,
        generated_task: Option<GeneratedTask>,
        student_text: String,
        assessment: Assessment,
    ) -> Self {
        Self {
            id: next_id(now.timestamp_millis(), newest_id),
            timestamp: now,
            task_type,
            generated_task,
            word_count: word_count(&student_text),
            student_text,
            scores: assessment.scores,
            feedback: assessment.feedback,
        }
    }
}

fn next_id(now_ms: i64, newest_id: Option<i64>) -> i64 {
    match newest_id {
        Some(prev) if prev >= now_ms => prev + 1,
        _ => now_ms,
    }
}
