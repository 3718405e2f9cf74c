//! Pipeline error types

use std::path::PathBuf;
use thiserror::Error;

/// Every way a release run can fail
///
/// None of these are recovered from: the first one raised aborts the run and
/// its message is surfaced verbatim.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required input was missing or blank
    #[error("Input required and not supplied: {name}")]
    InvalidInput { name: String },

    /// A collaborator exited with a non-zero status
    #[error("The process '{program}' failed with exit code {exit_code}")]
    CollaboratorFailure {
        program: String,
        args: Vec<String>,
        exit_code: i32,
    },

    /// A collaborator could not be started at all
    #[error("Unable to start process '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An artifact a collaborator should have written is not on disk
    #[error("Expected artifact '{name}' was not produced")]
    MissingArtifact { name: String },

    /// Branch detection returned nothing
    #[error("Could not determine the current branch name")]
    EmptyBranchName,

    /// `git add` staged nothing
    #[error("Nothing to commit: the release steps produced no changes")]
    NothingToCommit,

    /// The remote refused the push
    #[error("Push of '{refspec}' to '{remote}' was rejected (exit code {exit_code})")]
    PushRejected {
        remote: String,
        refspec: String,
        exit_code: i32,
    },

    /// A file the pipeline owns could not be read, written or removed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be loaded
    #[error("Invalid settings: {0}")]
    Settings(String),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_input(name: &str) -> Self {
        PipelineError::InvalidInput {
            name: name.to_string(),
        }
    }
}
