pub mod orchestrator;
pub mod pipeline;
pub mod status;

pub use orchestrator::{Orchestrator, RunError};
pub use pipeline::{Pipeline, PipelineOptions, RunOutcome};
pub use status::{RunRequest, RunState, RunStatus};
