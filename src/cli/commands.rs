//! CLI command definitions

use crate::core::{
    ExecutionContext, Identity, PipelineConfig, PipelineError, RawInputs, Settings,
};
use clap::Args;
use std::path::{Path, PathBuf};

/// Release inputs
///
/// Each input can also come from the GitHub Actions input environment
/// (`INPUT_<NAME>`). Required inputs are optional here so that a missing one
/// is reported as an invalid input rather than a usage error.
#[derive(Debug, Args, Clone, Default)]
pub struct ReleaseArgs {
    /// Branch to create the release from
    #[arg(long, env = "INPUT_SOURCE-BRANCH")]
    pub source_branch: Option<String>,

    /// Branch the release will eventually merge to
    #[arg(long, env = "INPUT_TARGET-BRANCH")]
    pub target_branch: Option<String>,

    /// Release branch naming prefix [default: release-branch/]
    #[arg(long, env = "INPUT_BRANCH-PREFIX")]
    pub branch_prefix: Option<String>,

    /// Base version for the release
    #[arg(long, env = "INPUT_CURRENT-VERSION")]
    pub current_version: Option<String>,

    /// Only include PRs merged since this date
    #[arg(long, env = "INPUT_MERGED-SINCE")]
    pub merged_since: Option<String>,

    /// Only include PRs merged until this date
    #[arg(long, env = "INPUT_MERGED-UNTIL")]
    pub merged_until: Option<String>,

    /// Comma-separated PR ids to include
    #[arg(long, env = "INPUT_INCLUDE-PR-IDS")]
    pub include_pr_ids: Option<String>,

    /// Exclude PRs matching this pattern
    #[arg(long, env = "INPUT_EXCLUDE-PATTERN")]
    pub exclude_pattern: Option<String>,

    /// Token exported to the scripts as GH_TOKEN
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Committer name
    #[arg(long, env = "GITHUB_ACTOR")]
    pub actor: Option<String>,

    /// Committer numeric id
    #[arg(long, env = "GITHUB_ACTOR_ID")]
    pub actor_id: Option<String>,

    /// Directory holding the release scripts
    #[arg(long, env = "INPUT_SCRIPTS-DIR")]
    pub scripts_dir: Option<PathBuf>,

    /// Repository to release from
    #[arg(long, default_value = ".")]
    pub working_dir: PathBuf,

    /// Install location of the action; scripts default to `<path>/scripts`
    #[arg(long, env = "GITHUB_ACTION_PATH", hide = true)]
    pub action_path: Option<PathBuf>,
}

impl ReleaseArgs {
    /// Raw inputs, before validation
    pub fn raw_inputs(&self, verbose: bool) -> RawInputs {
        RawInputs {
            source_branch: self.source_branch.clone(),
            target_branch: self.target_branch.clone(),
            branch_prefix: self.branch_prefix.clone(),
            current_version: self.current_version.clone(),
            merged_since: self.merged_since.clone(),
            merged_until: self.merged_until.clone(),
            include_pr_ids: self.include_pr_ids.clone(),
            exclude_pattern: self.exclude_pattern.clone(),
            verbose,
            github_token: self.github_token.clone(),
        }
    }

    /// Merge settings, validate inputs and build the execution context
    pub fn resolve(
        &self,
        settings_file: Option<&Path>,
        verbose: bool,
    ) -> Result<(PipelineConfig, ExecutionContext), PipelineError> {
        let settings = match settings_file {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };

        let config = PipelineConfig::from_inputs(self.raw_inputs(verbose).with_settings(&settings))?;

        let actor = self.actor.as_deref().or(settings.actor.as_deref());
        let actor_id = self.actor_id.as_deref().or(settings.actor_id.as_deref());

        let mut context = ExecutionContext::new(&self.working_dir)
            .with_scripts_dir(self.scripts_dir(&settings))
            .with_identity(Identity::from_actor(actor, actor_id))
            .with_token(config.token.clone());
        if let Some(shell) = settings.shell.as_deref().filter(|s| !s.is_empty()) {
            context = context.with_shell(shell);
        }

        Ok((config, context))
    }

    fn scripts_dir(&self, settings: &Settings) -> PathBuf {
        self.scripts_dir
            .clone()
            .or_else(|| settings.scripts_dir.clone())
            .or_else(|| self.action_path.as_ref().map(|p| p.join("scripts")))
            .unwrap_or_else(|| self.working_dir.join("scripts"))
    }
}

/// Run the release pipeline
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Also print the outputs as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validate inputs without running anything
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub release: ReleaseArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
