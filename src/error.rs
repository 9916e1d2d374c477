use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `writewise`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide how to present a failure; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum WritewiseError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Durable store ───────────────────────────────────────────────────
    #[error("store: {0}")]
    Store(#[from] StoreError),

    // ── Assessment workflow ─────────────────────────────────────────────
    #[error("assessment: {0}")]
    Assessment(#[from] AssessmentError),

    // ── Document export ─────────────────────────────────────────────────
    #[error("export: {0}")]
    Export(#[from] ExportError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} authentication failed")]
    Auth { provider: String },

    #[error("provider {provider} returned no usable payload")]
    EmptyResponse { provider: String },
}

// ─── Store errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend not available: {0}")]
    BackendUnavailable(String),

    #[error("sqlx: {0}")]
    Sqlx(String),

    #[error("record {key} could not be encoded: {message}")]
    Encode { key: String, message: String },
}

// ─── Assessment workflow errors ─────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("draft is empty; write something before asking for {operation}")]
    EmptyDraft { operation: String },

    #[error("{pending} is still in progress")]
    Busy { pending: String },

    #[error("provider call failed: {0}")]
    Provider(String),

    #[error("provider response did not match the expected shape: {0}")]
    InvalidResponse(String),

    #[error("draft has unsaved text; confirmation required before loading a task")]
    ConfirmationRequired,

    #[error("task {0} not found in the library")]
    TaskNotFound(String),

    #[error("assessment {0} not found in history")]
    HistoryEntryNotFound(String),

    #[error("id prefix {0} matches more than one record")]
    AmbiguousId(String),
}

// ─── Export errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("package write failed: {0}")]
    Package(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Package(err.to_string())
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, WritewiseError>;
