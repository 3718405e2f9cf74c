//! Optional YAML settings file
//!
//! Holds per-repository defaults that would otherwise have to be repeated on
//! every invocation. Anything given on the command line (or through the
//! action input environment) wins over the file.

use crate::core::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Prefix for the release branch name
    #[serde(default)]
    pub branch_prefix: Option<String>,

    /// Directory holding the collaborator scripts
    #[serde(default)]
    pub scripts_dir: Option<PathBuf>,

    /// Shell used to run the collaborator scripts
    #[serde(default)]
    pub shell: Option<String>,

    /// Committer name
    #[serde(default)]
    pub actor: Option<String>,

    /// Committer numeric id, used to build the noreply email
    #[serde(default)]
    pub actor_id: Option<String>,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Self::from_yaml(&content)
            .map_err(|e| PipelineError::Settings(format!("{}: {}", path.display(), e)))
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, PipelineError> {
        // An empty document is a valid "no overrides" file
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| PipelineError::Settings(e.to_string()))
    }
}
