//! Subprocess runner - spawns real processes

use crate::collaborator::{CollaboratorResult, CommandRunner, Invocation};
use crate::core::{ExecutionContext, PipelineError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs invocations as child processes
///
/// Children inherit the working directory and environment of the context
/// plus the pipeline's own environment. Output that is not captured streams
/// straight to the pipeline's stdout/stderr so it shows up in the CI log.
/// There is no timeout: a hung collaborator hangs the run.
#[derive(Debug, Clone, Default)]
pub struct SubprocessRunner;

impl SubprocessRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(ctx: &ExecutionContext, invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(ctx.working_dir())
            .envs(ctx.env_vars())
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl CommandRunner for SubprocessRunner {
    async fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<CollaboratorResult, PipelineError> {
        debug!("Running: {}", invocation.command_line());

        let mut cmd = Self::command(ctx, invocation);
        let spawn_error = |source: std::io::Error| PipelineError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        let (status, stdout) = if invocation.capture_stdout {
            let output = cmd
                .stdout(Stdio::piped())
                .output()
                .await
                .map_err(spawn_error)?;
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            (output.status, Some(stdout))
        } else {
            let status = cmd
                .stdout(Stdio::inherit())
                .status()
                .await
                .map_err(spawn_error)?;
            (status, None)
        };

        let exit_code = status.code().unwrap_or(-1);
        if exit_code != 0 {
            warn!("{} exited with code {}", invocation.program, exit_code);
        }

        Ok(CollaboratorResult { exit_code, stdout })
    }
}
