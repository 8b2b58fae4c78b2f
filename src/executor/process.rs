//! Single suite process execution
//!
//! Spawns one external suite command, streams its combined stdout/stderr
//! line-by-line into a log file and the live console, and turns the exit
//! status into a `RunOutcome`. Output is consumed incrementally; the whole
//! stream is never buffered in memory.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::adapter::{self, Invocation};
use crate::config::Workspace;
use crate::executor::relocate_dir;
use crate::models::{RunOutcome, SuiteKind, TestRunRequest};

/// Grace period between the polite stop request and the hard kill.
const KILL_GRACE: Duration = Duration::from_secs(10);

/// Failures on the execution path. All of these end up folded into a failed
/// `RunOutcome`; none propagate past the executor.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("empty command line")]
    EmptyCommand,

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("child output streams were not captured")]
    MissingPipe,

    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("i/o error while streaming suite output: {0}")]
    Io(#[from] std::io::Error),
}

/// Executes one suite run request as an external process.
pub struct SuiteExecutor {
    workspace: Workspace,
    shutdown: CancellationToken,
}

impl SuiteExecutor {
    pub fn new(workspace: Workspace, shutdown: CancellationToken) -> Self {
        Self {
            workspace,
            shutdown,
        }
    }

    /// Run one request end to end: build the invocation, stream the child
    /// process, and relocate HTML artifacts after a successful run.
    pub async fn run(&self, request: &TestRunRequest) -> RunOutcome {
        let kind = request.kind;
        info!("{} starting {}...", kind.tag(), kind.name());

        // The suite may write its HTML report straight into the shared
        // reports area, so its subdirectory must exist before the child runs.
        if let Err(e) = std::fs::create_dir_all(self.workspace.report_subdir(kind)) {
            warn!("could not create report directory for {}: {e}", kind.name());
        }

        let invocation = adapter::build_invocation(request, &self.workspace);
        let log_path = self.workspace.log_file(kind);

        match self.execute(&invocation, &log_path, kind).await {
            Ok(succeeded) => {
                let mut outcome = RunOutcome::completed(
                    request.clone(),
                    succeeded,
                    log_path.display().to_string(),
                );
                if succeeded {
                    if let Some(error) = self.relocate_artifacts(kind) {
                        outcome = outcome.with_artifact_error(error);
                    }
                }
                outcome
            }
            Err(e) => {
                error!("{} {} execution failed: {e}", kind.tag(), kind.name());
                RunOutcome::failed(request.clone(), format!("{} execution failed: {e}", kind.name()))
            }
        }
    }

    /// Spawn the command and stream its output until exit or shutdown.
    ///
    /// Returns whether the process exited with status 0. A run terminated by
    /// shutdown counts as failed; the log keeps whatever was captured.
    pub async fn execute(
        &self,
        invocation: &Invocation,
        log_path: &Path,
        kind: SuiteKind,
    ) -> Result<bool, ExecError> {
        let (program, args) = invocation
            .command
            .split_first()
            .ok_or(ExecError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or(ExecError::MissingPipe)?;
        let stderr = child.stderr.take().ok_or(ExecError::MissingPipe)?;

        let log_file = File::create(log_path)
            .await
            .map_err(|source| ExecError::LogFile {
                path: log_path.to_path_buf(),
                source,
            })?;
        let mut log = BufWriter::new(log_file);

        let mut stdout_lines = BufReader::new(stdout).lines();
        let mut stderr_lines = BufReader::new(stderr).lines();
        let mut stdout_done = false;
        let mut stderr_done = false;
        let tag = kind.tag();

        // Single consumer loop over both pipes. `next_line` is cancel safe,
        // so a read interrupted by another branch is never lost. Per-stream
        // line order is preserved end to end.
        let cancelled = loop {
            if stdout_done && stderr_done {
                break false;
            }
            tokio::select! {
                line = stdout_lines.next_line(), if !stdout_done => match line? {
                    Some(line) => write_line(&mut log, tag, &line).await?,
                    None => stdout_done = true,
                },
                line = stderr_lines.next_line(), if !stderr_done => match line? {
                    Some(line) => write_line(&mut log, tag, &line).await?,
                    None => stderr_done = true,
                },
                _ = self.shutdown.cancelled() => break true,
            }
        };

        log.flush().await?;

        if cancelled {
            info!("{tag} shutdown requested, terminating suite process");
            self.terminate(&mut child).await;
            return Ok(false);
        }

        let status = child.wait().await?;
        debug!("{tag} suite process exited with {status}");
        Ok(status.success())
    }

    /// Copy the suite's own HTML report into the shared reports area.
    /// Failures are tolerated; the returned description becomes outcome
    /// diagnostics only.
    fn relocate_artifacts(&self, kind: SuiteKind) -> Option<String> {
        let artifact = adapter::html_artifact(kind, &self.workspace)?;
        if !artifact.source.is_dir() {
            return None;
        }

        match relocate_dir(&artifact.source, &artifact.target) {
            Ok(()) => {
                debug!(
                    "{} HTML report copied to {}",
                    kind.name(),
                    artifact.target.display()
                );
                None
            }
            Err(e) => {
                warn!("{} HTML report relocation failed: {e:#}", kind.name());
                Some(format!("HTML report relocation failed: {e:#}"))
            }
        }
    }

    /// Ask the child to stop, escalating to a hard kill once the grace
    /// period runs out.
    async fn terminate(&self, child: &mut Child) {
        request_stop(child);
        if tokio::time::timeout(KILL_GRACE, child.wait()).await.is_err() {
            warn!("suite process ignored stop request, killing it");
            let _ = child.start_kill();
            let _ = child.wait().await;
        }
    }
}

async fn write_line(
    log: &mut BufWriter<File>,
    tag: &str,
    line: &str,
) -> Result<(), std::io::Error> {
    log.write_all(line.as_bytes()).await?;
    log.write_all(b"\n").await?;
    println!("{tag} {line}");
    Ok(())
}

#[cfg(unix)]
fn request_stop(child: &mut Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    if let Some(pid) = child.id() {
        let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
    }
}

#[cfg(not(unix))]
fn request_stop(child: &mut Child) {
    let _ = child.start_kill();
}
