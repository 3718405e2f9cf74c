//! Test: Cleanup - artifacts are removed only after a successful run

use crate::helpers::*;
use release_pipeline::core::Artifact;
use release_pipeline::execution::ExecutionEvent;
use tempfile::TempDir;

fn removed(result: &ReleaseTestResult) -> Vec<Artifact> {
    result
        .events
        .iter()
        .filter_map(|e| match e {
            ExecutionEvent::ArtifactRemoved { artifact } => Some(*artifact),
            _ => None,
        })
        .collect()
}

/// Test that the three required artifacts are removed when no PR URL exists
#[tokio::test]
async fn test_required_artifacts_removed() {
    let result = run_release(
        MockRunner::happy_path("1.4.0", "release-branch/1.4.0"),
        default_inputs(),
    )
    .await;

    assert!(result.is_success());
    for name in ["version.txt", "pr_data.txt", "release_notes.txt", "pr_url.txt"] {
        assert!(!result.file_exists(name), "{} should be gone", name);
    }
    assert_eq!(
        removed(&result),
        vec![Artifact::Version, Artifact::ReleaseNotes, Artifact::PrData]
    );
}

/// Test that pr_url.txt is removed when it existed
#[tokio::test]
async fn test_pr_url_removed_when_present() {
    let runner = MockRunner::happy_path("1.4.0", "release-branch/1.4.0")
        .respond("git push", Response::ok().writes("pr_url.txt", "https://x/pull/9"));

    let result = run_release(runner, default_inputs()).await;

    assert!(result.is_success());
    assert_eq!(result.outputs().pr_url.as_deref(), Some("https://x/pull/9"));
    assert!(!result.file_exists("pr_url.txt"));
    assert_eq!(removed(&result).len(), 4);
    assert_eq!(removed(&result).last(), Some(&Artifact::PrUrl));
}

/// Test that a required artifact deleted by a collaborator does not break cleanup
#[tokio::test]
async fn test_cleanup_tolerates_missing_release_notes() {
    let runner = MockRunner::happy_path("1.4.0", "release-branch/1.4.0").respond(
        "create-release-branch.sh",
        Response::ok()
            .writes("version.txt", "1.4.0")
            .writes("pr_data.txt", "#3"),
    );

    let result = run_release(runner, default_inputs()).await;

    assert!(result.is_success());
    assert_eq!(removed(&result), vec![Artifact::Version, Artifact::PrData]);
}

/// Test that unrelated files in the working directory are left alone
#[tokio::test]
async fn test_unrelated_files_untouched() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("CHANGELOG.md"), "# Changelog\n").unwrap();
    std::fs::write(dir.path().join("version.json"), "{}").unwrap();

    let result = run_release_in(
        dir,
        MockRunner::happy_path("1.4.0", "release-branch/1.4.0"),
        default_inputs(),
    )
    .await;

    assert!(result.is_success());
    assert!(result.file_exists("CHANGELOG.md"));
    assert!(result.file_exists("version.json"));
}

/// Test that removal happens only after outputs were reported
#[tokio::test]
async fn test_cleanup_follows_reporting() {
    let result = run_release(
        MockRunner::happy_path("1.4.0", "release-branch/1.4.0"),
        default_inputs(),
    )
    .await;

    let last_output = result
        .events
        .iter()
        .rposition(|e| matches!(e, ExecutionEvent::OutputReported { .. }))
        .unwrap();
    let first_removal = result
        .events
        .iter()
        .position(|e| matches!(e, ExecutionEvent::ArtifactRemoved { .. }))
        .unwrap();
    assert!(last_output < first_removal);
}
