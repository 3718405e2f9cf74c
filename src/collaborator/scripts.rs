//! Invocations of the release scripts

use crate::collaborator::Invocation;
use crate::core::{ExecutionContext, NewVersion, PipelineConfig, PrData};

/// Creates or checks out the release branch and writes the artifacts
pub const CREATE_RELEASE_BRANCH: &str = "create-release-branch.sh";
/// Rewrites the persisted version descriptor
pub const UPDATE_VERSION: &str = "update-version.sh";
/// Writes or updates the changelog
pub const GENERATE_CHANGELOG: &str = "generate-changelog.sh";

/// Argument vector for the branch-creation script
///
/// Required values always come first as `--flag value` pairs. Optional
/// filters are only appended when set: the script treats a flag's presence
/// as "apply this filter", so an absent filter must not become an empty one.
pub fn branch_creation_args(config: &PipelineConfig) -> Vec<String> {
    let mut args = vec![
        "--source".to_string(),
        config.source_branch.clone(),
        "--target".to_string(),
        config.target_branch.clone(),
        "--version".to_string(),
        config.current_version.clone(),
    ];

    let optional = [
        ("--branch-prefix", Some(config.branch_prefix.as_str()).filter(|p| !p.is_empty())),
        ("--from-date", config.merged_since.as_deref()),
        ("--to-date", config.merged_until.as_deref()),
        ("--include-pr-ids", config.include_pr_ids.as_deref()),
        ("--exclude", config.exclude_pattern.as_deref()),
    ];
    for (flag, value) in optional {
        if let Some(value) = value {
            args.push(flag.to_string());
            args.push(value.to_string());
        }
    }

    if config.verbose {
        args.push("--verbose".to_string());
    }

    args
}

/// Run the branch-creation script
pub fn create_release_branch(ctx: &ExecutionContext, config: &PipelineConfig) -> Invocation {
    script(ctx, CREATE_RELEASE_BRANCH).args(branch_creation_args(config))
}

/// Run the version-update script with the new version
pub fn update_version(ctx: &ExecutionContext, version: &NewVersion) -> Invocation {
    script(ctx, UPDATE_VERSION).arg(version.0.as_str())
}

/// Run the changelog script with the new version and PR payload
pub fn generate_changelog(
    ctx: &ExecutionContext,
    version: &NewVersion,
    pr_data: &PrData,
) -> Invocation {
    script(ctx, GENERATE_CHANGELOG)
        .arg(version.0.as_str())
        .arg(pr_data.0.as_str())
}

/// Make everything in the scripts directory executable
pub fn make_executable(ctx: &ExecutionContext) -> Invocation {
    Invocation::new("chmod")
        .args(["-R", "+x"])
        .arg(ctx.scripts_dir.to_string_lossy())
}

fn script(ctx: &ExecutionContext, name: &str) -> Invocation {
    Invocation::new(ctx.shell.as_str()).arg(ctx.script(name).to_string_lossy())
}
