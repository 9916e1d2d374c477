pub mod orchestrator;
pub mod prompts;
pub mod session;

pub use orchestrator::{AssessmentOrchestrator, Operation, OrchestratorSettings, TopicPicker};
pub use prompts::{TaskRequest, assess_request, improve_request};
pub use session::{
    ActiveView, Dirty, LOAD_CONFIRM_THRESHOLD_CHARS, SessionState, Submission, Workspace,
};
