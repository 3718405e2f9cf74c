//! Validated run configuration

use crate::core::{PipelineError, Settings};
use serde::Serialize;
use std::fmt;

/// Branch prefix used when none is configured
pub const DEFAULT_BRANCH_PREFIX: &str = "release-branch/";

/// Inputs exactly as received from the invoking environment
///
/// Empty strings are treated the same as absent values, which is how
/// GitHub Actions hands over inputs that were not set.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
    pub source_branch: Option<String>,
    pub target_branch: Option<String>,
    pub branch_prefix: Option<String>,
    pub current_version: Option<String>,
    pub merged_since: Option<String>,
    pub merged_until: Option<String>,
    pub include_pr_ids: Option<String>,
    pub exclude_pattern: Option<String>,
    pub verbose: bool,
    pub github_token: Option<String>,
}

impl RawInputs {
    /// Fill values the caller left out from a settings file
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        if non_empty(self.branch_prefix.as_deref()).is_none() {
            self.branch_prefix = settings.branch_prefix.clone();
        }
        self
    }
}

/// A secret string that never shows up in logs
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Immutable record of the validated inputs for one run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    /// Branch to create the release from
    pub source_branch: String,

    /// Branch the release will eventually merge to
    pub target_branch: String,

    /// Naming prefix for the release branch
    pub branch_prefix: String,

    /// Base version handed to branch creation
    pub current_version: String,

    /// Only include PRs merged on or after this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_since: Option<String>,

    /// Only include PRs merged on or before this date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_until: Option<String>,

    /// Explicit PR id allow-list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_pr_ids: Option<String>,

    /// PR exclusion filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_pattern: Option<String>,

    /// Pass `--verbose` through to branch creation
    pub verbose: bool,

    /// Token for code-hosting API calls made by collaborators
    #[serde(skip)]
    pub token: Secret,
}

impl PipelineConfig {
    /// Validate raw inputs into a configuration
    ///
    /// Required inputs must be non-blank. Optional inputs that are blank
    /// become absent so they are never forwarded as empty flags.
    pub fn from_inputs(raw: RawInputs) -> Result<Self, PipelineError> {
        let source_branch = required(raw.source_branch.as_deref(), "source-branch")?;
        let target_branch = required(raw.target_branch.as_deref(), "target-branch")?;
        let current_version = required(raw.current_version.as_deref(), "current-version")?;
        let token = required(raw.github_token.as_deref(), "github-token")?;

        let branch_prefix = non_empty(raw.branch_prefix.as_deref())
            .unwrap_or_else(|| DEFAULT_BRANCH_PREFIX.to_string());

        Ok(Self {
            source_branch,
            target_branch,
            branch_prefix,
            current_version,
            merged_since: non_empty(raw.merged_since.as_deref()),
            merged_until: non_empty(raw.merged_until.as_deref()),
            include_pr_ids: non_empty(raw.include_pr_ids.as_deref()),
            exclude_pattern: non_empty(raw.exclude_pattern.as_deref()),
            verbose: raw.verbose,
            token: Secret::new(token),
        })
    }
}

fn required(value: Option<&str>, name: &str) -> Result<String, PipelineError> {
    non_empty(value).ok_or_else(|| PipelineError::invalid_input(name))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
