//! Typed values handed from one stage to the next, and the run's outputs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version read from `version.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVersion(pub String);

/// PR payload read from `pr_data.txt`; its format belongs to the collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrData(pub String);

/// Branch checked out after branch creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseBranch(pub String);

impl NewVersion {
    /// Commit message for the version bump
    pub fn commit_message(&self) -> String {
        format!("bump(version): app to {}", self.0)
    }
}

impl ReleaseBranch {
    /// Refspec that pushes HEAD to this branch
    pub fn refspec(&self) -> String {
        format!("HEAD:{}", self.0)
    }
}

impl fmt::Display for NewVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ReleaseBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output name for the new version
pub const OUTPUT_NEW_VERSION: &str = "new-version";
/// Output name for the release branch
pub const OUTPUT_RELEASE_BRANCH: &str = "release-branch";
/// Output name for the PR URL
pub const OUTPUT_PR_URL: &str = "pr-url";

/// The externally visible result of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutputs {
    #[serde(rename = "new-version")]
    pub new_version: String,

    #[serde(rename = "release-branch")]
    pub release_branch: String,

    #[serde(rename = "pr-url", default, skip_serializing_if = "Option::is_none")]
    pub pr_url: Option<String>,
}

impl PipelineOutputs {
    /// Outputs as (name, value) pairs; `pr-url` only when present
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![
            (OUTPUT_NEW_VERSION, self.new_version.as_str()),
            (OUTPUT_RELEASE_BRANCH, self.release_branch.as_str()),
        ];
        if let Some(url) = &self.pr_url {
            entries.push((OUTPUT_PR_URL, url.as_str()));
        }
        entries
    }
}
