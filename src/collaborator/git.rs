//! Git invocations used by the pipeline

use crate::collaborator::Invocation;
use crate::core::{Identity, NewVersion, ReleaseBranch};

/// Remote the release branch is pushed to
pub const REMOTE: &str = "origin";

fn git() -> Invocation {
    Invocation::new("git")
}

/// Set a global git configuration value
pub fn config_global(key: &str, value: &str) -> Invocation {
    git().args(["config", "--global", key, value])
}

/// Invocations that set the committer identity
pub fn configure_identity(identity: &Identity) -> [Invocation; 2] {
    [
        config_global("user.name", &identity.name),
        config_global("user.email", &identity.email),
    ]
}

/// Print the checked-out branch name
pub fn show_current_branch() -> Invocation {
    git().args(["branch", "--show-current"]).capturing()
}

/// Stage every working-tree change
pub fn add_all() -> Invocation {
    git().args(["add", "."])
}

/// Exits 0 when nothing is staged, 1 when something is
pub fn diff_staged_quiet() -> Invocation {
    git().args(["diff", "--cached", "--quiet"])
}

/// Commit the staged changes as the version bump
pub fn commit(version: &NewVersion) -> Invocation {
    git().args(["commit", "-m"]).arg(version.commit_message())
}

/// Push HEAD to the release branch
pub fn push(remote: &str, branch: &ReleaseBranch) -> Invocation {
    git().args(["push", remote]).arg(branch.refspec())
}
