pub mod feedback;
pub mod history_entry;
pub mod rubric;
pub mod scores;
pub mod task;
pub mod topics;
pub mod word_count;

pub use feedback::{Assessment, AssessmentFeedback, FeedbackDetail, ImprovedResponse};
pub use history_entry::HistoryEntry;
pub use rubric::{Descriptor, SCALES, SubscaleDefinition};
pub use scores::{Band, ScoreState, Subscale};
pub use task::{GeneratedTask, TaskDraft, TaskType, task_context};
pub use topics::TOPICS;
pub use word_count::{TARGET_WORDS, WordCountStatus, word_count};
