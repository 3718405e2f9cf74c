//! Artifacts - files collaborators leave in the working directory

use crate::core::PipelineError;
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

/// A well-known file written by the branch-creation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// The version the release will carry
    Version,
    /// Raw PR payload for changelog generation
    PrData,
    /// Release notes; only ever cleaned up
    ReleaseNotes,
    /// URL of the release PR, when one was opened
    PrUrl,
}

impl Artifact {
    /// All artifacts, in cleanup order
    pub const ALL: [Artifact; 4] = [
        Artifact::Version,
        Artifact::ReleaseNotes,
        Artifact::PrData,
        Artifact::PrUrl,
    ];

    /// File name relative to the working directory
    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Version => "version.txt",
            Artifact::PrData => "pr_data.txt",
            Artifact::ReleaseNotes => "release_notes.txt",
            Artifact::PrUrl => "pr_url.txt",
        }
    }

    /// Whether every successful branch creation must produce it
    pub fn is_required(self) -> bool {
        !matches!(self, Artifact::PrUrl)
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Reads and removes artifacts under a root directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of an artifact on disk
    pub fn path(&self, artifact: Artifact) -> PathBuf {
        self.root.join(artifact.file_name())
    }

    /// Whether the artifact is present
    pub fn exists(&self, artifact: Artifact) -> bool {
        self.path(artifact).is_file()
    }

    /// Read an artifact that must exist, trimmed
    pub fn read_required(&self, artifact: Artifact) -> Result<String, PipelineError> {
        self.read(artifact)?.ok_or_else(|| PipelineError::MissingArtifact {
            name: artifact.file_name().to_string(),
        })
    }

    /// Read an artifact that may be absent, trimmed
    ///
    /// Absence and unreadable files both come back as `None`.
    pub fn read_optional(&self, artifact: Artifact) -> Option<String> {
        self.read(artifact).ok().flatten()
    }

    /// Delete an artifact if present
    ///
    /// Returns whether a file was actually removed.
    pub fn remove(&self, artifact: Artifact) -> Result<bool, PipelineError> {
        let path = self.path(artifact);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(PipelineError::io(path, e)),
        }
    }

    fn read(&self, artifact: Artifact) -> Result<Option<String>, PipelineError> {
        let path = self.path(artifact);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PipelineError::io(path, e)),
        }
    }
}
