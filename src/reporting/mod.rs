//! Output reporting - where a successful run publishes its results

pub mod github;

pub use github::{GithubOutputFile, StdoutSink};

use crate::core::PipelineError;

/// Destination for named run outputs
pub trait OutputSink: Send {
    /// Publish one output
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), PipelineError>;

    /// Publish a batch of outputs
    ///
    /// Sinks backed by a file override this so that either the whole batch
    /// lands or none of it does.
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<(), PipelineError> {
        for (name, value) in outputs {
            self.set_output(name, value)?;
        }
        Ok(())
    }
}

/// In-memory sink (for testing or for rendering outputs afterwards)
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    outputs: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of an output, if it was set
    pub fn get(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All outputs in the order they were set
    pub fn outputs(&self) -> &[(String, String)] {
        &self.outputs
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), PipelineError> {
        self.outputs.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
