//! Tests for the subprocess contract client
//!
//! Uses throwaway shell scripts to play misbehaving handlers.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use sensitive_file_guard::{HandlerError, HandlerExit, SubprocessHandler, Verdict};
use tempfile::TempDir;

fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

// Run scripts through `sh` so they never need to be executable.
fn sh(path: &Path) -> SubprocessHandler {
    SubprocessHandler::new("sh").arg(path.display().to_string())
}

#[tokio::test]
async fn test_stdin_is_delivered_and_closed() {
    let dir = TempDir::new().unwrap();
    let echo = script(&dir, "echo.sh", "cat\n");
    let response = sh(&echo).invoke_raw(b"{\"hello\":1}").await.unwrap();
    assert_eq!(response.exit, HandlerExit::Success);
    assert_eq!(response.stdout, "{\"hello\":1}");
}

#[tokio::test]
async fn test_unusual_exit_codes_warn() {
    let dir = TempDir::new().unwrap();
    let fail = script(&dir, "fail.sh", "echo oops >&2\nexit 3\n");
    let response = sh(&fail).invoke_raw(b"{}").await.unwrap();
    assert_eq!(response.exit, HandlerExit::Error(3));
    assert_eq!(response.verdict(), Verdict::Warn);
    assert_eq!(response.stderr, "oops\n");
}

#[tokio::test]
async fn test_block_exit_code() {
    let dir = TempDir::new().unwrap();
    let block = script(
        &dir,
        "block.sh",
        "cat >/dev/null\necho '{\"decision\":\"block\",\"reason\":\"no\"}'\nexit 2\n",
    );
    let response = sh(&block).invoke_raw(b"{}").await.unwrap();
    assert!(response.is_blocked());
    assert_eq!(response.decision().map(|d| d.reason), Some("no".to_string()));
}

#[tokio::test]
async fn test_handler_that_ignores_stdin() {
    let dir = TempDir::new().unwrap();
    let quiet = script(&dir, "quiet.sh", "exit 0\n");
    let payload = vec![b' '; 1024 * 1024];
    let response = sh(&quiet).invoke_raw(&payload).await.unwrap();
    assert_eq!(response.exit, HandlerExit::Success);
    assert!(response.stdout.is_empty());
}

#[tokio::test]
async fn test_timeout_kills_the_handler() {
    let dir = TempDir::new().unwrap();
    let slow = script(&dir, "slow.sh", "exec sleep 30\n");
    let err = sh(&slow)
        .timeout(Duration::from_millis(200))
        .invoke_raw(b"{}")
        .await
        .unwrap_err();
    assert!(matches!(err, HandlerError::Timeout(_)));
}

#[tokio::test]
async fn test_output_limit() {
    let dir = TempDir::new().unwrap();
    let noisy = script(&dir, "noisy.sh", "yes | head -c 10000\n");
    let err = sh(&noisy)
        .max_output_size(1000)
        .invoke_raw(b"{}")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HandlerError::OutputTooLarge { stream: "stdout", limit: 1000 }
    ));
}

#[tokio::test]
async fn test_working_directory() {
    let dir = TempDir::new().unwrap();
    let pwd = script(&dir, "pwd.sh", "pwd -P\n");
    let response = sh(&pwd).cwd(dir.path()).invoke_raw(b"").await.unwrap();
    let expected = dir.path().canonicalize().unwrap();
    assert_eq!(response.stdout.trim_end(), expected.display().to_string());
}

#[tokio::test]
async fn test_missing_program() {
    let err = SubprocessHandler::new("/nonexistent/hook-handler")
        .invoke_raw(b"{}")
        .await
        .unwrap_err();
    assert!(matches!(err, HandlerError::Spawn { .. }));

    let err = SubprocessHandler::find("definitely-not-an-installed-hook-handler").unwrap_err();
    assert!(matches!(err, HandlerError::Spawn { .. }));
}

#[tokio::test]
async fn test_find_resolves_path_programs() -> anyhow::Result<()> {
    let response = SubprocessHandler::find("sh")?
        .arg("-c")
        .arg("exit 2")
        .invoke_raw(b"")
        .await?;
    assert_eq!(response.exit, HandlerExit::Block);
    Ok(())
}
