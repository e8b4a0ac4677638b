//! Subprocess handler invocation

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};

use crate::error::{HandlerError, Result};
use crate::types::exit::HandlerExit;
use crate::types::hooks::HookEvent;

use super::config::{DEFAULT_MAX_OUTPUT_SIZE, DEFAULT_TIMEOUT};
use super::response::HandlerResponse;

/// A handler command, launched once per invocation
#[derive(Debug, Clone)]
pub struct SubprocessHandler {
    program: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    cwd: Option<PathBuf>,
    timeout: Duration,
    max_output_size: usize,
}

impl SubprocessHandler {
    /// Create a handler for `program`
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
            timeout: DEFAULT_TIMEOUT,
            max_output_size: DEFAULT_MAX_OUTPUT_SIZE,
        }
    }

    /// Create a handler for a program looked up on `PATH`
    ///
    /// # Errors
    /// Returns `HandlerError::Spawn` if `name` cannot be found
    pub fn find(name: &str) -> Result<Self> {
        let program = which::which(name).map_err(|e| {
            HandlerError::spawn(
                name,
                std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
            )
        })?;
        Ok(Self::new(program))
    }

    /// Add a command-line argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set an environment variable for the handler
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.cwd = Some(path.into());
        self
    }

    /// Set the invocation timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum size of each captured output stream
    #[must_use]
    pub const fn max_output_size(mut self, size: usize) -> Self {
        self.max_output_size = size;
        self
    }

    /// Invoke the handler with a hook event
    ///
    /// # Errors
    /// Returns `HandlerError::JsonEncode` if the event cannot be serialized,
    /// plus any error from [`Self::invoke_raw`]
    pub async fn invoke(&self, event: &HookEvent) -> Result<HandlerResponse> {
        let payload = serde_json::to_vec(event)?;
        self.invoke_raw(&payload).await
    }

    /// Invoke the handler with arbitrary stdin bytes
    ///
    /// Stdin is written and closed while stdout and stderr are drained
    /// concurrently, so a handler that writes before it finishes reading
    /// cannot deadlock against us. A non-zero exit is a normal response,
    /// not an error.
    ///
    /// # Errors
    /// Returns `HandlerError::Spawn` if the process cannot start,
    /// `HandlerError::Timeout` if it outlives the timeout,
    /// `HandlerError::OutputTooLarge` if it writes too much, or
    /// `HandlerError::Io` on pipe failure. The process is killed in every
    /// error case.
    pub async fn invoke_raw(&self, payload: &[u8]) -> Result<HandlerResponse> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| HandlerError::spawn(self.program.display().to_string(), e))?;
        log::debug!(
            "Spawned handler {} (pid {:?})",
            self.program.display(),
            child.id()
        );

        let stdin = child.stdin.take().ok_or_else(|| missing_pipe("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| missing_pipe("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| missing_pipe("stderr"))?;
        let limit = self.max_output_size;

        let exchange = tokio::time::timeout(self.timeout, async {
            let ((), stdout, stderr) = tokio::try_join!(
                write_input(stdin, payload),
                read_limited(stdout, limit, "stdout"),
                read_limited(stderr, limit, "stderr"),
            )?;
            let status = child.wait().await?;
            Ok::<_, HandlerError>((status, stdout, stderr))
        })
        .await;

        let (status, stdout, stderr) = match exchange {
            Ok(Ok(captured)) => captured,
            Ok(Err(e)) => {
                let _ = child.kill().await;
                return Err(e);
            }
            Err(_) => {
                log::warn!(
                    "Handler {} timed out after {:?}, killing it",
                    self.program.display(),
                    self.timeout
                );
                let _ = child.kill().await;
                return Err(HandlerError::timeout(self.timeout));
            }
        };

        // No code means the handler was killed by a signal.
        let exit = HandlerExit::from_code(status.code().unwrap_or(-1));
        log::debug!("Handler {} exited with {exit:?}", self.program.display());

        Ok(HandlerResponse {
            exit,
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

fn missing_pipe(name: &str) -> HandlerError {
    HandlerError::Io(std::io::Error::other(format!(
        "Failed to get {name} handle"
    )))
}

async fn write_input(mut stdin: ChildStdin, payload: &[u8]) -> Result<()> {
    match stdin.write_all(payload).await {
        // A handler may exit without reading its input.
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => return Ok(()),
        Err(e) => return Err(e.into()),
        Ok(()) => {}
    }
    match stdin.shutdown().await {
        Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => Err(e.into()),
        _ => Ok(()),
    }
}

async fn read_limited<R>(reader: R, limit: usize, stream: &'static str) -> Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    reader.take(cap).read_to_end(&mut buf).await?;
    if buf.len() > limit {
        return Err(HandlerError::OutputTooLarge { stream, limit });
    }
    Ok(buf)
}
