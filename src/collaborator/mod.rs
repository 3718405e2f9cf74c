//! Collaborator invocation - running external programs for the pipeline

pub mod git;
pub mod scripts;
pub mod subprocess;

use crate::core::{ExecutionContext, PipelineError};
use async_trait::async_trait;
pub use subprocess::SubprocessRunner;

/// A program and its ordered argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program to run
    pub program: String,

    /// Arguments, passed verbatim
    pub args: Vec<String>,

    /// Collect standard output instead of streaming it
    pub capture_stdout: bool,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            capture_stdout: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Ask for standard output to be captured
    pub fn capturing(mut self) -> Self {
        self.capture_stdout = true;
        self
    }

    /// Program and arguments joined for display
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorResult {
    /// Exit code; -1 when the process was killed by a signal
    pub exit_code: i32,

    /// Standard output, when captured
    pub stdout: Option<String>,
}

impl CollaboratorResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs invocations on behalf of the pipeline
///
/// `run` reports the exit code as-is; `run_checked` and `capture` turn a
/// non-zero exit into `CollaboratorFailure`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run an invocation to completion inside the given context
    async fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<CollaboratorResult, PipelineError>;

    /// Run and require a zero exit code
    async fn run_checked(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<(), PipelineError> {
        let result = self.run(ctx, invocation).await?;
        ensure_success(invocation, &result)
    }

    /// Run, require a zero exit code and return trimmed standard output
    async fn capture(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<String, PipelineError> {
        let invocation = invocation.clone().capturing();
        let result = self.run(ctx, &invocation).await?;
        ensure_success(&invocation, &result)?;
        Ok(result.stdout.unwrap_or_default().trim().to_string())
    }
}

fn ensure_success(
    invocation: &Invocation,
    result: &CollaboratorResult,
) -> Result<(), PipelineError> {
    if result.success() {
        Ok(())
    } else {
        Err(PipelineError::CollaboratorFailure {
            program: invocation.program.clone(),
            args: invocation.args.clone(),
            exit_code: result.exit_code,
        })
    }
}
