//! Execution state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Overall pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Pipeline has not started
    Pending,
    /// Pipeline is currently running
    Running,
    /// Pipeline completed successfully
    Completed,
    /// Pipeline failed
    Failed,
}

/// Stages of a release run, in the only order they may happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Configuring,
    CreatingBranch,
    ReadingVersion,
    UpdatingVersion,
    ReadingPrData,
    GeneratingChangelog,
    DetectingBranch,
    Committing,
    Pushing,
    ReportingOutputs,
    CleaningUp,
    Succeeded,
    Failed,
}

impl Stage {
    /// Stages that do work, in execution order
    pub const WORK: [Stage; 11] = [
        Stage::Configuring,
        Stage::CreatingBranch,
        Stage::ReadingVersion,
        Stage::UpdatingVersion,
        Stage::ReadingPrData,
        Stage::GeneratingChangelog,
        Stage::DetectingBranch,
        Stage::Committing,
        Stage::Pushing,
        Stage::ReportingOutputs,
        Stage::CleaningUp,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Succeeded | Stage::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Configuring => "configuring",
            Stage::CreatingBranch => "creating-branch",
            Stage::ReadingVersion => "reading-version",
            Stage::UpdatingVersion => "updating-version",
            Stage::ReadingPrData => "reading-pr-data",
            Stage::GeneratingChangelog => "generating-changelog",
            Stage::DetectingBranch => "detecting-branch",
            Stage::Committing => "committing",
            Stage::Pushing => "pushing",
            Stage::ReportingOutputs => "reporting-outputs",
            Stage::CleaningUp => "cleaning-up",
            Stage::Succeeded => "succeeded",
            Stage::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one release run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineState {
    /// Unique execution ID
    pub execution_id: Uuid,

    /// Current execution status
    pub status: ExecutionStatus,

    /// Stage currently running, or the terminal stage once finished
    pub stage: Option<Stage>,

    /// Stages finished successfully, in order
    pub completed_stages: Vec<Stage>,

    /// Stage that failed, if any
    pub failed_stage: Option<Stage>,

    /// Error message of the failure, verbatim
    pub error: Option<String>,

    /// When execution started
    pub started_at: Option<DateTime<Utc>>,

    /// When execution completed/failed
    pub completed_at: Option<DateTime<Utc>>,
}

impl PipelineState {
    pub fn new() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            status: ExecutionStatus::Pending,
            stage: None,
            completed_stages: Vec::new(),
            failed_stage: None,
            error: None,
            started_at: None,
            completed_at: None,
        }
    }

    /// Mark pipeline as started
    pub fn start(&mut self) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Move into a working stage
    pub fn enter(&mut self, stage: Stage) {
        self.stage = Some(stage);
    }

    /// Record the current stage as done
    pub fn finish_stage(&mut self, stage: Stage) {
        self.completed_stages.push(stage);
    }

    /// Mark pipeline as completed
    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.stage = Some(Stage::Succeeded);
        self.completed_at = Some(Utc::now());
    }

    /// Mark pipeline as failed in the current stage
    pub fn fail(&mut self, error: String) {
        self.failed_stage = self.stage.filter(|s| !s.is_terminal());
        self.status = ExecutionStatus::Failed;
        self.stage = Some(Stage::Failed);
        self.error = Some(error);
        self.completed_at = Some(Utc::now());
    }

    /// Fraction of work stages finished (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        self.completed_stages.len() as f64 / Stage::WORK.len() as f64
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
