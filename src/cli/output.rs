//! CLI output formatting

use crate::{
    collaborator::scripts,
    core::{
        ExecutionContext, ExecutionStatus, PipelineConfig, PipelineError, PipelineOutputs, Stage,
    },
    execution::ExecutionEvent,
};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Format a stage name for display
pub fn format_stage(stage: Stage) -> String {
    match stage {
        Stage::Succeeded => style(stage).green().to_string(),
        Stage::Failed => style(stage).red().to_string(),
        _ => style(stage).cyan().to_string(),
    }
}

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Pending => style("PENDING").dim().to_string(),
        ExecutionStatus::Running => style("RUNNING").yellow().to_string(),
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted { execution_id } => format!(
            "{} Starting release ({})",
            ROCKET,
            style(&execution_id.to_string()[..8]).dim()
        ),
        ExecutionEvent::StageStarted { stage } => {
            format!("{} {}", SPINNER, format_stage(*stage))
        }
        ExecutionEvent::StageCompleted { stage } => {
            format!("{} {}", CHECK, style(stage).green())
        }
        ExecutionEvent::StageFailed { stage, error } => {
            format!("{} {}: {}", CROSS, style(stage).red(), style(error).dim())
        }
        ExecutionEvent::OutputReported { name, value } => {
            format!("{} {} = {}", INFO, style(name).bold(), value)
        }
        ExecutionEvent::ArtifactRemoved { artifact } => {
            format!("{} removed {}", INFO, style(artifact).dim())
        }
        ExecutionEvent::PipelineCompleted {
            execution_id,
            status,
        } => format!(
            "{} Release ({}) {}",
            INFO,
            style(&execution_id.to_string()[..8]).dim(),
            format_status(*status)
        ),
    }
}

/// Format the outputs of a run
pub fn format_outputs(outputs: &PipelineOutputs) -> String {
    outputs
        .entries()
        .into_iter()
        .map(|(name, value)| format!("  {}: {}", style(name).bold(), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a resolved configuration for `validate`
pub fn format_config(config: &PipelineConfig, context: &ExecutionContext) -> String {
    let invocation = scripts::create_release_branch(context, config);
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    [
        format!("  Source branch: {}", style(&config.source_branch).bold()),
        format!("  Target branch: {}", style(&config.target_branch).bold()),
        format!("  Branch prefix: {}", config.branch_prefix),
        format!("  Current version: {}", style(&config.current_version).cyan()),
        format!("  Merged since: {}", optional(&config.merged_since)),
        format!("  Merged until: {}", optional(&config.merged_until)),
        format!("  Include PR ids: {}", optional(&config.include_pr_ids)),
        format!("  Exclude pattern: {}", optional(&config.exclude_pattern)),
        format!("  Committer: {} <{}>", context.identity.name, context.identity.email),
        format!("  Scripts: {}", context.scripts_dir.display()),
        format!("  Branch creation: {}", style(invocation.command_line()).dim()),
    ]
    .join("\n")
}

/// Escape a message for a GitHub Actions workflow command
pub fn format_workflow_error(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{}", escaped)
}

/// Exit status of a failed run
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Lines printed when a run fails
///
/// The error message is shown verbatim. Inside GitHub Actions it is also
/// raised as an `::error::` workflow command so the step is annotated.
pub fn format_failure(error: &PipelineError, in_github_actions: bool) -> Vec<String> {
    let mut lines = vec![format!("{} {}", CROSS, style(error).red())];
    if in_github_actions {
        lines.push(format_workflow_error(&error.to_string()));
    }
    lines
}
