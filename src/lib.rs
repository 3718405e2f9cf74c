//! release-pipeline - cut a release branch, bump the version and generate the changelog from CI

pub mod cli;
pub mod collaborator;
pub mod core;
pub mod execution;
pub mod reporting;

// Re-export commonly used types
pub use crate::collaborator::{CollaboratorResult, CommandRunner, Invocation, SubprocessRunner};
pub use crate::core::{ExecutionContext, PipelineConfig, PipelineError, PipelineOutputs, PipelineState, RawInputs, Stage};
pub use crate::execution::{ExecutionEvent, ReleasePipeline};
pub use crate::reporting::{MemorySink, OutputSink};
