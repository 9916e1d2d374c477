//! Working state and its transitions.
//!
//! Every transition mutates the [`Workspace`] and returns a [`Dirty`] set
//! naming the durable records it touched; the caller persists exactly those.

use crate::config::HistoryConfig;
use crate::domain::{
    Assessment, AssessmentFeedback, Band, GeneratedTask, HistoryEntry, ImprovedResponse,
    ScoreState, Subscale, TaskType,
};
use crate::error::AssessmentError;
use crate::history::BoundedHistory;
use crate::store::{self, ASSESSMENT_HISTORY_KEY, PersistentStore, SESSION_KEY, TASK_LIBRARY_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Drafts longer than this need confirmation before a task load discards them.
pub const LOAD_CONFIRM_THRESHOLD_CHARS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActiveView {
    #[default]
    Draft,
    Improved,
}

/// The live working state, stored under [`SESSION_KEY`].
///
/// `taskType`, `studentText` and `generatedTask` are always written; the
/// remaining fields default when absent so older records still load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub task_type: TaskType,
    pub student_text: String,
    pub generated_task: Option<GeneratedTask>,
    #[serde(default)]
    pub scores: ScoreState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<AssessmentFeedback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improved: Option<ImprovedResponse>,
    #[serde(default)]
    pub view: ActiveView,
}

/// Which durable records a transition changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dirty {
    pub session: bool,
    pub library: bool,
    pub history: bool,
}

impl Dirty {
    pub const NONE: Self = Self {
        session: false,
        library: false,
        history: false,
    };
    pub const SESSION: Self = Self {
        session: true,
        library: false,
        history: false,
    };
    pub const LIBRARY: Self = Self {
        session: false,
        library: true,
        history: false,
    };
    pub const HISTORY: Self = Self {
        session: false,
        library: false,
        history: true,
    };

    #[must_use]
    pub fn with(self, other: Self) -> Self {
        Self {
            session: self.session || other.session,
            library: self.library || other.library,
            history: self.history || other.history,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub session: SessionState,
    pub library: BoundedHistory<GeneratedTask>,
    pub history: BoundedHistory<HistoryEntry>,
}

impl Workspace {
    pub fn new(limits: &HistoryConfig) -> Self {
        Self {
            session: SessionState::default(),
            library: BoundedHistory::new(limits.task_library_capacity),
            history: BoundedHistory::new(limits.assessment_history_capacity),
        }
    }

    /// Rebuild the workspace from `store`; unreadable records start empty.
    pub async fn restore(store: &dyn PersistentStore, limits: &HistoryConfig) -> Self {
        let session = store::load::<SessionState>(store, SESSION_KEY)
            .await
            .unwrap_or_default();
        let tasks = store::load::<Vec<GeneratedTask>>(store, TASK_LIBRARY_KEY)
            .await
            .unwrap_or_default();
        let entries = store::load::<Vec<HistoryEntry>>(store, ASSESSMENT_HISTORY_KEY)
            .await
            .unwrap_or_default();

        tracing::debug!(
            tasks = tasks.len(),
            entries = entries.len(),
            "workspace restored"
        );

        Self {
            session,
            library: BoundedHistory::from_items(limits.task_library_capacity, tasks),
            history: BoundedHistory::from_items(limits.assessment_history_capacity, entries),
        }
    }

    /// Mirror the records named in `dirty` into `store`.
    pub async fn persist(&self, store: &dyn PersistentStore, dirty: Dirty) {
        if dirty.session {
            store::save(store, SESSION_KEY, &self.session).await;
        }
        if dirty.library {
            store::save(store, TASK_LIBRARY_KEY, self.library.items()).await;
        }
        if dirty.history {
            store::save(store, ASSESSMENT_HISTORY_KEY, self.history.items()).await;
        }
    }

    // ── User transitions ────────────────────────────────────────────────

    /// Switch genre. Keeps the active task only when it already has the new
    /// type; always drops feedback, the improved text and scores.
    pub fn change_task_type(&mut self, task_type: TaskType) -> Dirty {
        let session = &mut self.session;
        session.task_type = task_type;
        if session
            .generated_task
            .as_ref()
            .is_some_and(|t| t.task_type != task_type)
        {
            session.generated_task = None;
        }
        session.feedback = None;
        session.improved = None;
        session.scores = ScoreState::default();
        session.view = ActiveView::Draft;
        Dirty::SESSION
    }

    pub fn set_draft(&mut self, text: String) -> Dirty {
        self.session.student_text = text;
        Dirty::SESSION
    }

    pub fn clear_draft(&mut self) -> Dirty {
        self.set_draft(String::new())
    }

    pub fn set_score(&mut self, subscale: Subscale, band: Band) -> Dirty {
        self.session.scores = self.session.scores.with(subscale, band);
        Dirty::SESSION
    }

    pub fn set_view(&mut self, view: ActiveView) -> Dirty {
        self.session.view = view;
        Dirty::SESSION
    }

    pub fn needs_load_confirmation(&self) -> bool {
        self.session.student_text.chars().count() > LOAD_CONFIRM_THRESHOLD_CHARS
    }

    /// Make a library task active. The improved text and view are kept.
    pub fn load_task(&mut self, id: &str, confirmed: bool) -> Result<Dirty, AssessmentError> {
        let task = self
            .library
            .find(id)
            .cloned()
            .ok_or_else(|| AssessmentError::TaskNotFound(id.to_string()))?;
        if self.needs_load_confirmation() && !confirmed {
            return Err(AssessmentError::ConfirmationRequired);
        }

        let session = &mut self.session;
        session.task_type = task.task_type;
        session.generated_task = Some(task);
        session.student_text.clear();
        session.feedback = None;
        session.scores = ScoreState::default();
        Ok(Dirty::SESSION)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Dirty, AssessmentError> {
        if self.library.find(id).is_none() {
            return Err(AssessmentError::TaskNotFound(id.to_string()));
        }
        self.library = self.library.remove_by_id(id);
        Ok(Dirty::LIBRARY)
    }

    pub fn delete_history_entry(&mut self, id: i64) -> Result<Dirty, AssessmentError> {
        if self.history.find(&id).is_none() {
            return Err(AssessmentError::HistoryEntryNotFound(id.to_string()));
        }
        self.history = self.history.remove_by_id(&id);
        Ok(Dirty::HISTORY)
    }

    /// Exact id, or a prefix matching exactly one library task.
    pub fn resolve_task_id(&self, query: &str) -> Result<String, AssessmentError> {
        resolve_unique(
            self.library.iter().map(|t| t.id.clone()),
            query,
            || AssessmentError::TaskNotFound(query.to_string()),
        )
    }

    /// Exact id, or a prefix matching exactly one history entry.
    pub fn resolve_history_id(&self, query: &str) -> Result<i64, AssessmentError> {
        let id = resolve_unique(
            self.history.iter().map(|e| e.id.to_string()),
            query,
            || AssessmentError::HistoryEntryNotFound(query.to_string()),
        )?;
        id.parse()
            .map_err(|_| AssessmentError::HistoryEntryNotFound(query.to_string()))
    }

    // ── Provider results ────────────────────────────────────────────────

    pub fn apply_generated(&mut self, task: GeneratedTask) -> Dirty {
        self.library = self.library.insert_front(task.clone());
        let session = &mut self.session;
        session.task_type = task.task_type;
        session.student_text.clear();
        session.feedback = None;
        session.improved = None;
        session.view = ActiveView::Draft;
        session.generated_task = Some(task);
        Dirty::SESSION.with(Dirty::LIBRARY)
    }

    pub fn apply_improved(&mut self, improved: ImprovedResponse) -> Dirty {
        self.session.improved = Some(improved);
        self.session.view = ActiveView::Improved;
        Dirty::SESSION
    }

    /// Commit an assessment of `submission`, the draft as it was sent.
    /// Returns the history entry that was recorded.
    pub fn apply_assessment(
        &mut self,
        now: DateTime<Utc>,
        submission: Submission,
        assessment: Assessment,
    ) -> (Dirty, HistoryEntry) {
        self.session.scores = assessment.scores;
        self.session.feedback = Some(assessment.feedback.clone());

        let entry = HistoryEntry::record(
            now,
            self.history.first().map(|e| e.id),
            submission.task_type,
            submission.generated_task,
            submission.text,
            assessment,
        );
        self.history = self.history.insert_front(entry.clone());
        (Dirty::SESSION.with(Dirty::HISTORY), entry)
    }
}

/// The draft and task context captured when an improve or assess call starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub task_type: TaskType,
    pub generated_task: Option<GeneratedTask>,
    pub text: String,
}

impl Submission {
    pub fn capture(session: &SessionState) -> Self {
        Self {
            task_type: session.task_type,
            generated_task: session.generated_task.clone(),
            text: session.student_text.clone(),
        }
    }
}

fn resolve_unique(
    ids: impl Iterator<Item = String>,
    query: &str,
    not_found: impl FnOnce() -> AssessmentError,
) -> Result<String, AssessmentError> {
    let query = query.trim();
    let mut matches = Vec::new();
    for id in ids {
        if id == query {
            return Ok(id);
        }
        if !query.is_empty() && id.starts_with(query) {
            matches.push(id);
        }
    }
    match matches.len() {
        0 => Err(not_found()),
        1 => Ok(matches.remove(0)),
        _ => Err(AssessmentError::AmbiguousId(query.to_string())),
    }
}
