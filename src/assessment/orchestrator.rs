//! Drives the three provider-backed operations against the workspace.
//!
//! The workspace lock is never held across a provider call. A draft is
//! captured as a [`Submission`] first, the request runs unlocked, and the
//! result is folded back in under the lock before the touched records are
//! persisted.
//!
//! Exclusion is two-level: an in-process marker, then a lease in the store
//! shared with every other process on the same database. Each commit starts
//! from the records as currently stored.

use super::prompts::{TaskRequest, assess_request, improve_request};
use super::session::{Dirty, Submission, Workspace};
use crate::config::{Config, HistoryConfig};
use crate::domain::{
    Assessment, GeneratedTask, HistoryEntry, ImprovedResponse, TOPICS, TaskDraft, TaskType,
    task_context,
};
use crate::error::AssessmentError;
use crate::llm::{Provider, StructuredRequest};
use crate::store::{OperationLease, PersistentStore};
use chrono::Utc;
use rand::seq::IndexedRandom;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::{Arc, PoisonError};
use std::time::Duration;
use strum::Display;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Slack added to the provider timeout before a held lease expires.
const LEASE_GRACE_SECS: u64 = 30;

/// A provider-backed operation. At most one runs at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    #[strum(to_string = "task generation")]
    GenerateTask,
    #[strum(to_string = "writing improvement")]
    ImproveWriting,
    #[strum(to_string = "assessment")]
    AssessWriting,
}

pub type TopicPicker = Box<dyn Fn(&[&'static str]) -> &'static str + Send + Sync>;

#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub model: String,
    pub temperature: f64,
    pub limits: HistoryConfig,
    /// How long a claimed operation lease stays valid.
    pub lease_ttl: Duration,
}

impl OrchestratorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.default_model.clone(),
            temperature: config.default_temperature,
            limits: config.history.clone(),
            lease_ttl: Duration::from_secs(
                config.provider.timeout_secs.saturating_add(LEASE_GRACE_SECS),
            ),
        }
    }
}

fn random_topic(topics: &[&'static str]) -> &'static str {
    topics.choose(&mut rand::rng()).copied().unwrap_or_default()
}

/// Clears the in-flight marker when the operation ends, however it ends.
struct BusyGuard<'a> {
    slot: &'a std::sync::Mutex<Option<Operation>>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

pub struct AssessmentOrchestrator {
    provider: Arc<dyn Provider>,
    store: Arc<dyn PersistentStore>,
    settings: OrchestratorSettings,
    workspace: Mutex<Workspace>,
    in_flight: std::sync::Mutex<Option<Operation>>,
    /// Identifies this orchestrator's lease in the shared store.
    owner: String,
    pick_topic: TopicPicker,
}

impl AssessmentOrchestrator {
    pub fn new(
        provider: Arc<dyn Provider>,
        store: Arc<dyn PersistentStore>,
        workspace: Workspace,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            provider,
            store,
            settings,
            workspace: Mutex::new(workspace),
            in_flight: std::sync::Mutex::new(None),
            owner: Uuid::new_v4().to_string(),
            pick_topic: Box::new(random_topic),
        }
    }

    /// Restore the workspace from `store` and wrap it.
    pub async fn restore(
        provider: Arc<dyn Provider>,
        store: Arc<dyn PersistentStore>,
        settings: OrchestratorSettings,
    ) -> Self {
        let workspace = Workspace::restore(store.as_ref(), &settings.limits).await;
        Self::new(provider, store, workspace, settings)
    }

    #[must_use]
    pub fn with_topic_picker(
        mut self,
        picker: impl Fn(&[&'static str]) -> &'static str + Send + Sync + 'static,
    ) -> Self {
        self.pick_topic = Box::new(picker);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// The operation this process has awaiting the provider, if any.
    pub fn in_flight(&self) -> Option<Operation> {
        *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The workspace as currently stored.
    pub async fn snapshot(&self) -> Workspace {
        let mut workspace = self.workspace.lock().await;
        self.reload(&mut workspace).await;
        workspace.clone()
    }

    /// Apply a local transition and persist what it touched.
    pub async fn update<F>(&self, transition: F) -> Result<Dirty, AssessmentError>
    where
        F: FnOnce(&mut Workspace) -> Result<Dirty, AssessmentError>,
    {
        let mut workspace = self.workspace.lock().await;
        self.reload(&mut workspace).await;
        let dirty = transition(&mut workspace)?;
        workspace.persist(self.store.as_ref(), dirty).await;
        Ok(dirty)
    }

    /// Ask the provider for a fresh task of `task_type` and make it active.
    pub async fn generate_task(&self, task_type: TaskType) -> Result<GeneratedTask, AssessmentError> {
        self.exclusive(Operation::GenerateTask, async move {
            let topic = (self.pick_topic)(&TOPICS[..]);
            let request = TaskRequest::new(task_type, topic);
            tracing::info!(%task_type, topic, "generating task");

            let raw = self
                .call_provider(&request.to_request(self.settings.temperature))
                .await?;
            let draft: TaskDraft = parse_response(&raw)?;
            if request.schema().requires("opinions") && draft.opinions.is_none() {
                return Err(AssessmentError::InvalidResponse(
                    "missing field `opinions`".into(),
                ));
            }

            let task = GeneratedTask::stamp(draft, task_type);
            Ok(self
                .commit(move |ws| (ws.apply_generated(task.clone()), task))
                .await)
        })
        .await
    }

    /// Rewrite the current draft at band 5.
    pub async fn improve_writing(&self) -> Result<ImprovedResponse, AssessmentError> {
        let submission = self.capture("writing improvement").await?;
        self.exclusive(Operation::ImproveWriting, async move {
            let context = task_context(submission.generated_task.as_ref(), submission.task_type);
            let raw = self
                .call_provider(&improve_request(
                    &submission.text,
                    &context,
                    self.settings.temperature,
                ))
                .await?;
            let improved: ImprovedResponse = parse_response(&raw)?;

            Ok(self
                .commit(move |ws| (ws.apply_improved(improved.clone()), improved))
                .await)
        })
        .await
    }

    /// Score the current draft and record it in the assessment history.
    pub async fn assess_writing(&self) -> Result<HistoryEntry, AssessmentError> {
        let submission = self.capture("assessment").await?;
        self.exclusive(Operation::AssessWriting, async move {
            let context = task_context(submission.generated_task.as_ref(), submission.task_type);
            let raw = self
                .call_provider(&assess_request(
                    &submission.text,
                    &context,
                    self.settings.temperature,
                ))
                .await?;
            let assessment: Assessment = parse_response(&raw)?;

            let entry = self
                .commit(move |ws| ws.apply_assessment(Utc::now(), submission, assessment))
                .await;
            tracing::info!(
                id = entry.id,
                total = entry.scores.total(),
                words = entry.word_count,
                "assessment recorded"
            );
            Ok(entry)
        })
        .await
    }

    async fn capture(&self, operation: &'static str) -> Result<Submission, AssessmentError> {
        let mut workspace = self.workspace.lock().await;
        self.reload(&mut workspace).await;
        if workspace.session.student_text.trim().is_empty() {
            return Err(AssessmentError::EmptyDraft {
                operation: operation.to_string(),
            });
        }
        Ok(Submission::capture(&workspace.session))
    }

    /// Pick up records written by other processes sharing the store.
    async fn reload(&self, workspace: &mut Workspace) {
        *workspace = Workspace::restore(self.store.as_ref(), &self.settings.limits).await;
    }

    /// Fold a provider result into the stored state and persist it.
    async fn commit<R>(&self, apply: impl FnOnce(&mut Workspace) -> (Dirty, R)) -> R {
        let mut workspace = self.workspace.lock().await;
        self.reload(&mut workspace).await;
        let (dirty, result) = apply(&mut workspace);
        workspace.persist(self.store.as_ref(), dirty).await;
        result
    }

    /// Run `body` holding both the in-process marker and the store lease.
    async fn exclusive<T>(
        &self,
        operation: Operation,
        body: impl Future<Output = Result<T, AssessmentError>>,
    ) -> Result<T, AssessmentError> {
        let _busy = self.begin(operation)?;
        self.claim(operation).await?;
        let result = body.await;
        if let Err(err) = self.store.release(&self.owner).await {
            tracing::warn!(store = self.store.name(), error = %err, "failed to release operation lease");
        }
        result
    }

    fn begin(&self, operation: Operation) -> Result<BusyGuard<'_>, AssessmentError> {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = *slot {
            return Err(AssessmentError::Busy {
                pending: pending.to_string(),
            });
        }
        *slot = Some(operation);
        Ok(BusyGuard {
            slot: &self.in_flight,
        })
    }

    async fn claim(&self, operation: Operation) -> Result<(), AssessmentError> {
        let ttl = chrono::Duration::from_std(self.settings.lease_ttl)
            .unwrap_or_else(|_| chrono::Duration::hours(1));
        let lease = OperationLease {
            owner: self.owner.clone(),
            operation: operation.to_string(),
            expires_at: Utc::now() + ttl,
        };
        match self.store.try_claim(&lease).await {
            Ok(None) => Ok(()),
            Ok(Some(pending)) => {
                tracing::info!(%operation, pending, "operation rejected; store lease held elsewhere");
                Err(AssessmentError::Busy { pending })
            }
            Err(err) => {
                tracing::warn!(store = self.store.name(), error = %err, "operation lease unavailable; running unguarded");
                Ok(())
            }
        }
    }

    async fn call_provider(&self, request: &StructuredRequest) -> Result<String, AssessmentError> {
        self.provider
            .generate_json(request, &self.settings.model)
            .await
            .map_err(|err| {
                tracing::warn!(provider = self.provider.name(), error = %err, "provider call failed");
                AssessmentError::Provider(format!("{err:#}"))
            })
    }
}

fn parse_response<T: DeserializeOwned>(raw: &str) -> Result<T, AssessmentError> {
    serde_json::from_str(raw).map_err(|err| {
        tracing::warn!(error = %err, "provider payload did not match schema");
        AssessmentError::InvalidResponse(err.to_string())
    })
}
