//! GitHub Actions output file and plain stdout sinks

use crate::core::PipelineError;
use crate::reporting::OutputSink;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Environment variable naming the step output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Appends outputs to the file named by `GITHUB_OUTPUT`
///
/// Each value is written in the heredoc form
/// `name<<DELIM\nvalue\nDELIM\n` so multi-line values survive.
#[derive(Debug, Clone)]
pub struct GithubOutputFile {
    path: PathBuf,
}

impl GithubOutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sink for the current step, if running inside GitHub Actions
    pub fn from_env() -> Option<Self> {
        std::env::var_os(GITHUB_OUTPUT_ENV)
            .filter(|p| !p.is_empty())
            .map(Self::new)
    }

    fn format(name: &str, value: &str) -> String {
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    }

    /// Append already formatted entries with a single write
    fn append(&self, content: &str) -> Result<(), PipelineError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PipelineError::io(&self.path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| PipelineError::io(&self.path, e))
    }
}

impl OutputSink for GithubOutputFile {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), PipelineError> {
        self.append(&Self::format(name, value))
    }

    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<(), PipelineError> {
        let content: String = outputs
            .iter()
            .map(|(name, value)| Self::format(name, value))
            .collect();
        self.append(&content)
    }
}

/// Prints `name=value` lines
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl StdoutSink {
    fn format(name: &str, value: &str) -> String {
        format!("{}={}", name, value)
    }
}

impl OutputSink for StdoutSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), PipelineError> {
        println!("{}", Self::format(name, value));
        Ok(())
    }
}
