//! Release pipeline engine - runs the stages of one release in order

use crate::{
    collaborator::{git, scripts, CommandRunner},
    core::{
        Artifact, ArtifactStore, ExecutionContext, ExecutionStatus, NewVersion, PipelineConfig,
        PipelineError, PipelineOutputs, PipelineState, PrData, ReleaseBranch, Stage,
    },
    reporting::OutputSink,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Events that can occur during a release run
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
    },
    StageStarted {
        stage: Stage,
    },
    StageCompleted {
        stage: Stage,
    },
    StageFailed {
        stage: Stage,
        error: String,
    },
    OutputReported {
        name: String,
        value: String,
    },
    ArtifactRemoved {
        artifact: Artifact,
    },
    PipelineCompleted {
        execution_id: Uuid,
        status: ExecutionStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Runs one release: identity, branch creation, version bump, changelog,
/// commit, push, outputs, cleanup
///
/// Stages run strictly one after another and the first error aborts the run.
/// Artifacts are only removed once every earlier stage has succeeded, so a
/// failed run leaves them on disk for inspection.
pub struct ReleasePipeline<R> {
    runner: R,
    context: ExecutionContext,
    config: PipelineConfig,
    artifacts: ArtifactStore,
    event_handlers: Vec<EventHandler>,
}

impl<R: CommandRunner> ReleasePipeline<R> {
    pub fn new(runner: R, context: ExecutionContext, config: PipelineConfig) -> Self {
        let artifacts = ArtifactStore::new(context.working_dir());
        Self {
            runner,
            context,
            config,
            artifacts,
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute the whole release
    ///
    /// Outputs are published to `sink` during the reporting stage and also
    /// returned. On failure `state` records the failed stage and message.
    pub async fn execute(
        &self,
        state: &mut PipelineState,
        sink: &mut dyn OutputSink,
    ) -> Result<PipelineOutputs, PipelineError> {
        let execution_id = state.execution_id;
        info!("Starting release pipeline ({})", execution_id);
        self.emit_event(ExecutionEvent::PipelineStarted { execution_id });

        state.start();
        let result = self.run_stages(state, sink).await;

        match &result {
            Ok(_) => state.complete(),
            Err(e) => {
                error!("Release pipeline failed: {}", e);
                state.fail(e.to_string());
            }
        }

        self.emit_event(ExecutionEvent::PipelineCompleted {
            execution_id,
            status: state.status,
        });
        result
    }

    async fn run_stages(
        &self,
        state: &mut PipelineState,
        sink: &mut dyn OutputSink,
    ) -> Result<PipelineOutputs, PipelineError> {
        self.stage(state, Stage::Configuring, self.configure()).await?;
        self.stage(state, Stage::CreatingBranch, self.create_branch()).await?;

        let version = self
            .stage(state, Stage::ReadingVersion, async {
                self.artifacts.read_required(Artifact::Version).map(NewVersion)
            })
            .await?;
        info!("New version: {}", version);

        self.stage(state, Stage::UpdatingVersion, self.update_version(&version))
            .await?;

        let pr_data = self
            .stage(state, Stage::ReadingPrData, async {
                self.artifacts.read_required(Artifact::PrData).map(PrData)
            })
            .await?;

        self.stage(
            state,
            Stage::GeneratingChangelog,
            self.generate_changelog(&version, &pr_data),
        )
        .await?;

        let branch = self
            .stage(state, Stage::DetectingBranch, self.detect_branch())
            .await?;
        info!("Release branch: {}", branch);

        self.stage(state, Stage::Committing, self.commit(&version)).await?;
        self.stage(state, Stage::Pushing, self.push(&branch)).await?;

        let outputs = self
            .stage(state, Stage::ReportingOutputs, async {
                self.report_outputs(&version, &branch, sink)
            })
            .await?;

        self.stage(state, Stage::CleaningUp, async { self.clean_up() })
            .await?;

        Ok(outputs)
    }

    /// Run one stage, recording it in the state and the event stream
    async fn stage<T, F>(
        &self,
        state: &mut PipelineState,
        stage: Stage,
        work: F,
    ) -> Result<T, PipelineError>
    where
        F: Future<Output = Result<T, PipelineError>>,
    {
        debug!("Entering stage {}", stage);
        state.enter(stage);
        self.emit_event(ExecutionEvent::StageStarted { stage });

        match work.await {
            Ok(value) => {
                state.finish_stage(stage);
                self.emit_event(ExecutionEvent::StageCompleted { stage });
                Ok(value)
            }
            Err(e) => {
                self.emit_event(ExecutionEvent::StageFailed {
                    stage,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn configure(&self) -> Result<(), PipelineError> {
        for invocation in git::configure_identity(&self.context.identity) {
            self.runner.run_checked(&self.context, &invocation).await?;
        }
        self.runner
            .run_checked(&self.context, &scripts::make_executable(&self.context))
            .await
    }

    async fn create_branch(&self) -> Result<(), PipelineError> {
        let invocation = scripts::create_release_branch(&self.context, &self.config);
        info!(
            "Executing {} with parameters: {}",
            scripts::CREATE_RELEASE_BRANCH,
            invocation.args.join(" ")
        );
        self.runner.run_checked(&self.context, &invocation).await
    }

    async fn update_version(&self, version: &NewVersion) -> Result<(), PipelineError> {
        self.runner
            .run_checked(&self.context, &scripts::update_version(&self.context, version))
            .await
    }

    async fn generate_changelog(
        &self,
        version: &NewVersion,
        pr_data: &PrData,
    ) -> Result<(), PipelineError> {
        let invocation = scripts::generate_changelog(&self.context, version, pr_data);
        self.runner.run_checked(&self.context, &invocation).await
    }

    async fn detect_branch(&self) -> Result<ReleaseBranch, PipelineError> {
        let name = self
            .runner
            .capture(&self.context, &git::show_current_branch())
            .await?;
        if name.is_empty() {
            return Err(PipelineError::EmptyBranchName);
        }
        Ok(ReleaseBranch(name))
    }

    async fn commit(&self, version: &NewVersion) -> Result<(), PipelineError> {
        self.runner.run_checked(&self.context, &git::add_all()).await?;

        let staged = git::diff_staged_quiet();
        let result = self.runner.run(&self.context, &staged).await?;
        match result.exit_code {
            0 => return Err(PipelineError::NothingToCommit),
            1 => {}
            exit_code => {
                return Err(PipelineError::CollaboratorFailure {
                    program: staged.program,
                    args: staged.args,
                    exit_code,
                })
            }
        }

        self.runner
            .run_checked(&self.context, &git::commit(version))
            .await
    }

    async fn push(&self, branch: &ReleaseBranch) -> Result<(), PipelineError> {
        let invocation = git::push(git::REMOTE, branch);
        let result = self.runner.run(&self.context, &invocation).await?;
        if !result.success() {
            return Err(PipelineError::PushRejected {
                remote: git::REMOTE.to_string(),
                refspec: branch.refspec(),
                exit_code: result.exit_code,
            });
        }
        Ok(())
    }

    fn report_outputs(
        &self,
        version: &NewVersion,
        branch: &ReleaseBranch,
        sink: &mut dyn OutputSink,
    ) -> Result<PipelineOutputs, PipelineError> {
        let pr_url = if self.artifacts.exists(Artifact::PrUrl) {
            self.artifacts.read_optional(Artifact::PrUrl)
        } else {
            None
        };

        let outputs = PipelineOutputs {
            new_version: version.0.clone(),
            release_branch: branch.0.clone(),
            pr_url,
        };

        // All outputs land or none do
        let entries = outputs.entries();
        sink.set_outputs(&entries)?;
        for (name, value) in entries {
            self.emit_event(ExecutionEvent::OutputReported {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        Ok(outputs)
    }

    fn clean_up(&self) -> Result<(), PipelineError> {
        for artifact in Artifact::ALL {
            if !artifact.is_required() && !self.artifacts.exists(artifact) {
                continue;
            }
            if self.artifacts.remove(artifact)? {
                debug!("Removed {}", artifact);
                self.emit_event(ExecutionEvent::ArtifactRemoved { artifact });
            }
        }
        Ok(())
    }
}
