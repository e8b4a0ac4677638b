//! Handler side of the stdio contract
//!
//! Reads the whole payload, decides, writes the output once, and reports the
//! exit code. Generic over the three streams so the same path runs against the
//! real process handles and in-memory buffers.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{HandlerError, Result};
use crate::hooks::SensitiveFileGuard;
use crate::message::parse_hook_event;
use crate::types::decision::HandlerOutput;
use crate::types::exit::HandlerExit;
use crate::types::hooks::HookEvent;

/// Read the complete payload from `reader` and parse it
///
/// With `max_input_size` of `None` the whole stream is read.
///
/// # Errors
/// Returns `HandlerError::InputTooLarge` if more than `max_input_size` bytes
/// arrive, `HandlerError::Io` on read failure, or any error from
/// [`parse_hook_event`]
pub async fn read_event<R>(mut reader: R, max_input_size: Option<usize>) -> Result<HookEvent>
where
    R: AsyncRead + Unpin,
{
    let mut raw = Vec::new();
    match max_input_size {
        None => {
            reader.read_to_end(&mut raw).await?;
        }
        Some(max) => {
            // One byte past the limit is enough to detect overflow.
            let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            reader.take(limit).read_to_end(&mut raw).await?;
            if raw.len() > max {
                return Err(HandlerError::input_too_large(raw.len(), max));
            }
        }
    }

    log::debug!("Read {} bytes of hook data", raw.len());
    parse_hook_event(&raw)
}

/// Write the handler output to `writer` in one go
///
/// The output is rendered before anything is written, so a failure leaves the
/// stream untouched.
///
/// # Errors
/// Returns `HandlerError::JsonEncode` if rendering fails or
/// `HandlerError::Io` if the write fails
pub async fn write_output<W>(writer: &mut W, output: &HandlerOutput) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let rendered = output.render()?;
    writer.write_all(rendered.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Handle one invocation end to end
///
/// This is the single failure boundary: any error is reported on `stderr` and
/// turned into its exit code, and nothing is written to `stdout`. A payload
/// over the configured limit exits with the block code.
///
/// # Returns
/// The exit code the process should terminate with
pub async fn run_handler<R, W, E>(
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
    guard: &SensitiveFileGuard,
) -> HandlerExit
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    match handle(stdin, stdout, guard).await {
        Ok(exit) => exit,
        Err(e) => {
            log::debug!("Invocation failed: {e:?}");
            let report = format!("{e}\n");
            if let Err(write_err) = stderr.write_all(report.as_bytes()).await {
                log::warn!("Failed to report error on stderr: {write_err}");
            }
            if let Err(flush_err) = stderr.flush().await {
                log::warn!("Failed to flush stderr: {flush_err}");
            }
            e.exit_code()
        }
    }
}

async fn handle<R, W>(stdin: R, stdout: &mut W, guard: &SensitiveFileGuard) -> Result<HandlerExit>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let event = read_event(stdin, guard.options().max_input_size).await?;
    let outcome = guard.decide(&event)?;
    write_output(stdout, &outcome.output).await?;
    Ok(outcome.exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::decision::{Decision, FreeformOutput};
    use crate::types::options::GuardOptions;

    async fn run(input: &[u8]) -> (HandlerExit, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_handler(input, &mut stdout, &mut stderr, &SensitiveFileGuard::default()).await;
        (
            exit,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[tokio::test]
    async fn read_event_accepts_chunked_input() {
        let reader = tokio_test::io::Builder::new()
            .read(br#"{"hook_event_name":"#)
            .read(br#""PostToolUse","tool_name":"Read"}"#)
            .build();
        let event = read_event(reader, Some(1024)).await.unwrap();
        assert_eq!(event.tool_name(), "Read");
    }

    #[tokio::test]
    async fn read_event_enforces_the_size_limit() {
        let err = read_event(&b"{\"prompt\":\"0123456789\"}"[..], Some(8))
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::InputTooLarge { limit: 8, .. }));
    }

    #[tokio::test]
    async fn write_output_writes_exactly_the_rendering() {
        let mut writer = tokio_test::io::Builder::new()
            .write(b"{\"decision\":\"approve\",\"reason\":\"\"}\n")
            .build();
        write_output(&mut writer, &HandlerOutput::Decision(Decision::approve()))
            .await
            .unwrap();

        let mut writer = tokio_test::io::Builder::new().write(b"one\ntwo\n").build();
        write_output(
            &mut writer,
            &HandlerOutput::Freeform(FreeformOutput::lines(["one", "two"])),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn malformed_input_reports_on_stderr_only() {
        let (exit, stdout, stderr) = run(b"not json").await;
        assert_eq!(exit, HandlerExit::Error(1));
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("Error parsing hook data:"));
    }

    #[tokio::test]
    async fn processing_errors_report_on_stderr_only() {
        let (exit, stdout, stderr) = run(
            br#"{"hook_event_name":"PreToolUse","tool_name":"Edit","tool_input":"oops"}"#,
        )
        .await;
        assert_eq!(exit, HandlerExit::Error(1));
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("Handler error:"));
    }

    /// Accepts writes, fails every flush
    struct UnflushableWriter;

    impl AsyncWrite for UnflushableWriter {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            std::task::Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe)))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn stderr_flush_failure_keeps_the_exit_code() {
        let mut stdout = Vec::new();
        let exit = run_handler(
            &b"not json"[..],
            &mut stdout,
            &mut UnflushableWriter,
            &SensitiveFileGuard::default(),
        )
        .await;
        assert_eq!(exit, HandlerExit::Error(1));
        assert!(stdout.is_empty());
    }

    #[tokio::test]
    async fn blocks_and_approves() {
        let (exit, stdout, stderr) = run(
            br#"{"hook_event_name":"PreToolUse","tool_name":"Edit","tool_input":{"file_path":"config/.env"}}"#,
        )
        .await;
        assert_eq!(exit, HandlerExit::Block);
        assert_eq!(
            stdout,
            "{\"decision\":\"block\",\"reason\":\"Editing sensitive file 'config/.env' is not allowed\"}\n"
        );
        assert!(stderr.is_empty());

        let (exit, stdout, _) = run(br#"{"hook_event_name":"Stop"}"#).await;
        assert_eq!(exit, HandlerExit::Success);
        assert_eq!(stdout, "{\"decision\":\"approve\",\"reason\":\"\"}\n");
    }

    #[tokio::test]
    async fn custom_limit_applies_to_run_handler() {
        let guard = SensitiveFileGuard::new(GuardOptions::builder().max_input_size(4).build());
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let exit = run_handler(&b"{\"cwd\":\"/\"}"[..], &mut stdout, &mut stderr, &guard).await;
        assert_eq!(exit, HandlerExit::Block);
        assert!(stdout.is_empty());
        assert!(String::from_utf8(stderr).unwrap().contains("exceeds limit of 4 bytes"));
    }

    #[tokio::test]
    async fn large_sensitive_edits_are_still_blocked() {
        let payload = serde_json::json!({
            "hook_event_name": "PreToolUse",
            "tool_name": "Edit",
            "tool_input": {
                "file_path": "/repo/.env",
                "old_string": "",
                "new_string": "x".repeat(5 * 1024 * 1024),
            }
        })
        .to_string();
        let (exit, stdout, stderr) = run(payload.as_bytes()).await;
        assert_eq!(exit, HandlerExit::Block);
        assert!(stdout.starts_with("{\"decision\":\"block\""));
        assert!(stderr.is_empty());
    }
}
