//! Test utility functions for release scenarios

use async_trait::async_trait;
use release_pipeline::collaborator::{CollaboratorResult, CommandRunner, Invocation};
use release_pipeline::core::{
    ExecutionContext, ExecutionStatus, PipelineConfig, PipelineError, PipelineOutputs,
    PipelineState, RawInputs, Secret, Stage,
};
use release_pipeline::execution::{ExecutionEvent, ReleasePipeline};
use release_pipeline::reporting::{MemorySink, OutputSink};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Canned answer for invocations matching a pattern
#[derive(Debug, Clone, Default)]
pub struct Response {
    exit_code: i32,
    stdout: Option<String>,
    files: Vec<(String, String)>,
}

impl Response {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn exit(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    pub fn stdout(mut self, stdout: &str) -> Self {
        self.stdout = Some(stdout.to_string());
        self
    }

    /// Write a file into the working directory when invoked
    pub fn writes(mut self, name: &str, content: &str) -> Self {
        self.files.push((name.to_string(), content.to_string()));
        self
    }
}

/// One invocation as the runner saw it
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub invocation: Invocation,
    pub env: Vec<(String, String)>,
    pub working_dir: PathBuf,
}

/// Command runner that records invocations and answers from a script
///
/// Rules are matched against the invocation's command line; the most
/// recently added matching rule wins. Unmatched invocations succeed with
/// empty output.
#[derive(Clone, Default)]
pub struct MockRunner {
    rules: Arc<Mutex<Vec<(String, Response)>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A run where every collaborator does its job
    pub fn happy_path(version: &str, branch: &str) -> Self {
        Self::new()
            .respond(
                "create-release-branch.sh",
                Response::ok()
                    .writes("version.txt", &format!("{}\n", version))
                    .writes("pr_data.txt", "#12 Add login\n#15 Fix crash\n")
                    .writes("release_notes.txt", "## Notes\n"),
            )
            .respond("branch --show-current", Response::ok().stdout(&format!("{}\n", branch)))
            .respond("diff --cached --quiet", Response::exit(1))
    }

    pub fn respond(self, pattern: &str, response: Response) -> Self {
        self.rules
            .lock()
            .unwrap()
            .push((pattern.to_string(), response));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.invocation.command_line())
            .collect()
    }

    /// Index of the first call whose command line contains `pattern`
    pub fn position(&self, pattern: &str) -> Option<usize> {
        self.command_lines().iter().position(|c| c.contains(pattern))
    }

    pub fn called(&self, pattern: &str) -> bool {
        self.position(pattern).is_some()
    }

    /// First call whose command line contains `pattern`
    pub fn find(&self, pattern: &str) -> Option<Invocation> {
        self.position(pattern)
            .map(|i| self.calls()[i].invocation.clone())
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<CollaboratorResult, PipelineError> {
        self.calls.lock().unwrap().push(RecordedCall {
            invocation: invocation.clone(),
            env: ctx
                .env_vars()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            working_dir: ctx.working_dir().to_path_buf(),
        });

        let command_line = invocation.command_line();
        let response = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(pattern, _)| command_line.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_default();

        for (name, content) in &response.files {
            std::fs::write(ctx.working_dir().join(name), content).unwrap();
        }

        Ok(CollaboratorResult {
            exit_code: response.exit_code,
            stdout: if invocation.capture_stdout {
                Some(response.stdout.unwrap_or_default())
            } else {
                None
            },
        })
    }
}

/// Inputs for a typical release
pub fn default_inputs() -> RawInputs {
    RawInputs {
        source_branch: Some("develop".to_string()),
        target_branch: Some("main".to_string()),
        current_version: Some("1.3.2".to_string()),
        github_token: Some("ghs_test_token".to_string()),
        ..Default::default()
    }
}

/// Result of running a release against a mock runner
pub struct ReleaseTestResult<S = MemorySink> {
    pub dir: TempDir,
    pub runner: MockRunner,
    pub state: PipelineState,
    pub sink: S,
    pub events: Vec<ExecutionEvent>,
    pub result: Result<PipelineOutputs, PipelineError>,
}

impl<S> ReleaseTestResult<S> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok() && self.state.status == ExecutionStatus::Completed
    }

    pub fn error(&self) -> &PipelineError {
        match &self.result {
            Err(e) => e,
            Ok(outputs) => panic!("expected failure, pipeline succeeded with {:?}", outputs),
        }
    }

    pub fn outputs(&self) -> &PipelineOutputs {
        match &self.result {
            Ok(outputs) => outputs,
            Err(e) => panic!("expected success, pipeline failed: {}", e),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    /// Stages that started, in order
    pub fn started_stages(&self) -> Vec<Stage> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ExecutionEvent::StageStarted { stage } => Some(*stage),
                _ => None,
            })
            .collect()
    }
}

/// Run a release in a fresh temporary working directory
pub async fn run_release(runner: MockRunner, inputs: RawInputs) -> ReleaseTestResult {
    let dir = TempDir::new().unwrap();
    run_release_in(dir, runner, inputs).await
}

/// Run a release in a prepared working directory
pub async fn run_release_in(
    dir: TempDir,
    runner: MockRunner,
    inputs: RawInputs,
) -> ReleaseTestResult {
    run_release_with_sink(dir, runner, inputs, MemorySink::new()).await
}

/// Run a release publishing its outputs to `sink`
pub async fn run_release_with_sink<S: OutputSink>(
    dir: TempDir,
    runner: MockRunner,
    inputs: RawInputs,
    mut sink: S,
) -> ReleaseTestResult<S> {
    let config = PipelineConfig::from_inputs(inputs).unwrap();
    let context = context_for(dir.path(), &config);

    let events = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline = ReleasePipeline::new(runner.clone(), context, config);
    let recorded = events.clone();
    pipeline.add_event_handler(move |event| recorded.lock().unwrap().push(event));

    let mut state = PipelineState::new();
    let result = pipeline.execute(&mut state, &mut sink).await;

    let events = events.lock().unwrap().clone();
    ReleaseTestResult {
        dir,
        runner,
        state,
        sink,
        events,
        result,
    }
}

fn context_for(dir: &Path, config: &PipelineConfig) -> ExecutionContext {
    ExecutionContext::new(dir)
        .with_scripts_dir("/action/scripts")
        .with_token(Secret::new(config.token.expose()))
}
