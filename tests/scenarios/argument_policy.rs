//! Test: Argument Policy - what reaches the branch-creation script

use crate::helpers::*;
use release_pipeline::core::RawInputs;

const OPTIONAL_FLAGS: [&str; 5] = [
    "--from-date",
    "--to-date",
    "--include-pr-ids",
    "--exclude",
    "--verbose",
];

async fn branch_creation_args(inputs: RawInputs) -> Vec<String> {
    let result = run_release(MockRunner::happy_path("1.4.0", "release-branch/1.4.0"), inputs).await;
    assert!(result.is_success());
    let invocation = result.runner.find("create-release-branch.sh").unwrap();
    // First argument is the script itself
    invocation.args[1..].to_vec()
}

fn occurrences(args: &[String], flag: &str) -> usize {
    args.iter().filter(|a| a.as_str() == flag).count()
}

fn value_of<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

/// Test that unset filters never reach the script
#[tokio::test]
async fn test_unset_filters_absent() {
    let args = branch_creation_args(default_inputs()).await;

    for flag in OPTIONAL_FLAGS {
        assert_eq!(occurrences(&args, flag), 0, "{} should not be passed", flag);
    }
    assert_eq!(value_of(&args, "--source"), Some("develop"));
    assert_eq!(value_of(&args, "--target"), Some("main"));
    assert_eq!(value_of(&args, "--version"), Some("1.3.2"));
}

/// Test that blank filters are treated as unset
#[tokio::test]
async fn test_blank_filters_absent() {
    let args = branch_creation_args(RawInputs {
        merged_since: Some(String::new()),
        merged_until: Some(" ".to_string()),
        include_pr_ids: Some(String::new()),
        exclude_pattern: Some(String::new()),
        ..default_inputs()
    })
    .await;

    for flag in OPTIONAL_FLAGS {
        assert_eq!(occurrences(&args, flag), 0, "{} should not be passed", flag);
    }
    assert!(args.iter().all(|a| !a.is_empty()));
}

/// Test that every set filter is passed exactly once with its value
#[tokio::test]
async fn test_set_filters_present_once() {
    let args = branch_creation_args(RawInputs {
        branch_prefix: Some("rel/".to_string()),
        merged_since: Some("2024-03-01".to_string()),
        merged_until: Some("2024-03-31".to_string()),
        include_pr_ids: Some("101,102".to_string()),
        exclude_pattern: Some("^chore".to_string()),
        ..default_inputs()
    })
    .await;

    for (flag, value) in [
        ("--branch-prefix", "rel/"),
        ("--from-date", "2024-03-01"),
        ("--to-date", "2024-03-31"),
        ("--include-pr-ids", "101,102"),
        ("--exclude", "^chore"),
    ] {
        assert_eq!(occurrences(&args, flag), 1, "{} should be passed once", flag);
        assert_eq!(value_of(&args, flag), Some(value));
    }
}

/// Test that verbose is a bare flag
#[tokio::test]
async fn test_verbose_flag_has_no_value() {
    let args = branch_creation_args(RawInputs {
        verbose: true,
        ..default_inputs()
    })
    .await;

    assert_eq!(occurrences(&args, "--verbose"), 1);
    assert_eq!(args.last().map(String::as_str), Some("--verbose"));
}

/// Test that the default prefix is always handed over
#[tokio::test]
async fn test_default_prefix_passed() {
    let args = branch_creation_args(default_inputs()).await;
    assert_eq!(value_of(&args, "--branch-prefix"), Some("release-branch/"));
}
