//! Subprocess-backed analysis engine.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};

use super::{AnalysisEngine, EngineInvocation, Termination};
use crate::error_handling::AnalysisError;
use crate::models::AnalysisRequest;

/// How to start the engine.
#[derive(Debug, Clone)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub timeout: Duration,
}

impl EngineCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
            timeout: Duration::from_secs(crate::config::DEFAULT_ENGINE_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Spawns one engine process per request. No pooling and no reuse.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    command: EngineCommand,
}

impl ProcessEngine {
    pub fn new(command: EngineCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &EngineCommand {
        &self.command
    }
}

#[async_trait]
impl AnalysisEngine for ProcessEngine {
    async fn invoke(&self, request: &AnalysisRequest) -> Result<EngineInvocation, AnalysisError> {
        let message = serde_json::to_vec(request).map_err(std::io::Error::other)?;

        let mut command = Command::new(&self.command.program);
        command
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(ref dir) = self.command.working_dir {
            command.current_dir(dir);
        }

        let mut child = command
            .spawn()
            .map_err(|source| AnalysisError::EngineLaunch {
                program: self.command.program.clone(),
                source,
            })?;
        debug!(
            "Spawned analysis engine {} (pid {:?}) for {}",
            self.command.program,
            child.id(),
            request.url
        );

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both channels while feeding stdin so a chatty engine cannot
        // block on a full pipe.
        let run = async {
            let ((), output, diagnostics) =
                tokio::try_join!(feed(stdin, &message), drain(stdout), drain(stderr))?;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((output, diagnostics, status))
        };

        let outcome = tokio::time::timeout(self.command.timeout, run).await;
        match outcome {
            Ok(Ok((output, diagnostics, status))) => Ok(EngineInvocation {
                output,
                diagnostics,
                termination: Termination {
                    exit_code: status.code(),
                    success: status.success(),
                },
            }),
            Ok(Err(e)) => Err(AnalysisError::Io(e)),
            Err(_) => {
                if let Err(e) = child.start_kill() {
                    log::warn!("Failed to kill timed-out analysis engine: {e}");
                }
                let _ = child.wait().await;
                Err(AnalysisError::Timeout {
                    seconds: self.command.timeout.as_secs(),
                })
            }
        }
    }
}

/// Writes the request and closes stdin. An engine that exits without
/// reading its input is not an error here.
async fn feed(stdin: Option<ChildStdin>, message: &[u8]) -> std::io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    let written = async {
        stdin.write_all(message).await?;
        stdin.shutdown().await
    }
    .await;
    match written {
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            debug!("Analysis engine closed stdin early");
            Ok(())
        }
        other => other,
    }
}

async fn drain<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut reader) = reader {
        reader.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}
