//! Release pipeline execution

pub mod engine;

pub use engine::{EventHandler, ExecutionEvent, ReleasePipeline};
