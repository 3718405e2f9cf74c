//! Execution context - everything a collaborator invocation inherits

use crate::core::Secret;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Committer name used when no actor is known
pub const DEFAULT_ACTOR_NAME: &str = "GitHub Action";

/// Numeric id of the GitHub Actions bot account
pub const DEFAULT_ACTOR_ID: &str = "41898282";

/// Login used in the noreply email when no actor is known
const DEFAULT_ACTOR_LOGIN: &str = "github-actions[bot]";

/// Environment variable collaborators read the API token from
pub const TOKEN_ENV: &str = "GH_TOKEN";

/// Committer identity for the release commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Build the identity for a CI actor
    ///
    /// The email is the GitHub noreply address `<id>+<login>@users.noreply.github.com`.
    pub fn from_actor(actor: Option<&str>, actor_id: Option<&str>) -> Self {
        let actor = actor.map(str::trim).filter(|a| !a.is_empty());
        let actor_id = actor_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_ACTOR_ID);

        Self {
            name: actor.unwrap_or(DEFAULT_ACTOR_NAME).to_string(),
            email: format!(
                "{}+{}@users.noreply.github.com",
                actor_id,
                actor.unwrap_or(DEFAULT_ACTOR_LOGIN)
            ),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::from_actor(None, None)
    }
}

/// Context threaded into every collaborator invocation
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Checked-out repository the run acts on
    pub working_dir: PathBuf,

    /// Directory holding the collaborator scripts
    pub scripts_dir: PathBuf,

    /// Shell the scripts are run through
    pub shell: String,

    /// Committer identity
    pub identity: Identity,

    /// API token exported to collaborators
    token: Option<Secret>,
}

impl ExecutionContext {
    /// Create a context rooted at a working directory
    ///
    /// Scripts default to `<working_dir>/scripts`, run through `bash`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        Self {
            scripts_dir: working_dir.join("scripts"),
            working_dir,
            shell: "bash".to_string(),
            identity: Identity::default(),
            token: None,
        }
    }

    pub fn with_scripts_dir(mut self, scripts_dir: impl Into<PathBuf>) -> Self {
        self.scripts_dir = scripts_dir.into();
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_token(mut self, token: Secret) -> Self {
        self.token = Some(token);
        self
    }

    /// Full path of a collaborator script
    pub fn script(&self, name: &str) -> PathBuf {
        self.scripts_dir.join(name)
    }

    /// Working directory
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Extra environment for spawned processes
    pub fn env_vars(&self) -> Vec<(&'static str, &str)> {
        self.token
            .iter()
            .map(|token| (TOKEN_ENV, token.expose()))
            .collect()
    }
}
