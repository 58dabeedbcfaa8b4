use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Status output beyond this is dropped.
const MAX_STATUS_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed while waiting for {program}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Exited(Option<i32>),
    TimedOut,
}

pub struct FusionCommand;

impl FusionCommand {
    fn build(program: &Path, args: &[String], working_dir: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Runs `program` and waits up to `wait` for it to exit. Output is logged
    /// line by line as it arrives, and all of it is logged before returning
    /// unless the pipes stay open past the deadline. A process still running
    /// at the deadline is left alone.
    pub async fn run_logged(
        program: &Path,
        args: &[String],
        working_dir: &Path,
        wait: Duration,
        service: &str,
    ) -> Result<CommandStatus, ProcessError> {
        let program_name = program.display().to_string();
        let mut child = Self::build(program, args, working_dir)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: program_name.clone(),
                source,
            })?;

        let deadline = Instant::now() + wait;
        let readers = [
            log_lines(child.stdout.take(), service, "stdout"),
            log_lines(child.stderr.take(), service, "stderr"),
        ];

        match tokio::time::timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => {
                drain(readers, deadline, service).await;
                Ok(CommandStatus::Exited(status.code()))
            }
            Ok(Err(source)) => Err(ProcessError::Wait {
                program: program_name,
                source,
            }),
            // Dropping the handles detaches the readers.
            Err(_) => Ok(CommandStatus::TimedOut),
        }
    }

    /// Runs `program` and returns its stdout, lines joined with `\n`. Returns
    /// `None` if the process does not finish within `wait`; it is killed then.
    pub async fn capture_stdout(
        program: &Path,
        args: &[String],
        working_dir: &Path,
        wait: Duration,
        service: &str,
    ) -> Result<Option<String>, ProcessError> {
        let program_name = program.display().to_string();
        let mut cmd = Self::build(program, args, working_dir);
        cmd.kill_on_drop(true);
        let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
            program: program_name.clone(),
            source,
        })?;

        let deadline = Instant::now() + wait;
        let stderr = log_lines(child.stderr.take(), service, "stderr");
        let stdout = child.stdout.take();

        let collected = tokio::time::timeout_at(deadline, async {
            let bytes = read_capped(stdout, MAX_STATUS_BYTES, service).await;
            let status = child.wait().await;
            (bytes, status)
        })
        .await;

        match collected {
            Ok((bytes, Ok(_status))) => {
                drain([stderr], deadline, service).await;
                let text = String::from_utf8_lossy(&bytes);
                Ok(Some(text.lines().collect::<Vec<_>>().join("\n")))
            }
            Ok((_, Err(source))) => Err(ProcessError::Wait {
                program: program_name,
                source,
            }),
            Err(_) => Ok(None),
        }
    }
}

fn log_lines<R>(
    reader: Option<R>,
    service: &str,
    stream: &'static str,
) -> Option<JoinHandle<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let reader = reader?;
    let service = service.to_string();
    Some(tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => tracing::info!(service = %service, stream, "{}", line),
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(service = %service, stream, "Stopped reading output: {}", e);
                    break;
                }
            }
        }
    }))
}

/// Waits for the output readers of an exited process. A grandchild that
/// inherited the pipes can keep them open; readers still running at the
/// deadline are detached.
async fn drain<const N: usize>(
    readers: [Option<JoinHandle<()>>; N],
    deadline: Instant,
    service: &str,
) {
    for reader in readers.into_iter().flatten() {
        if tokio::time::timeout_at(deadline, reader).await.is_err() {
            tracing::debug!(service = %service, "Output still open after exit, no longer waiting");
            return;
        }
    }
}

/// Reads at most `limit` bytes. Anything past the limit is read and discarded
/// so the writer does not block on a full pipe.
async fn read_capped<R: AsyncRead + Unpin>(
    reader: Option<R>,
    limit: u64,
    service: &str,
) -> Vec<u8> {
    let mut buf = Vec::new();
    let Some(reader) = reader else {
        return buf;
    };

    let mut head = reader.take(limit + 1);
    if let Err(e) = head.read_to_end(&mut buf).await {
        tracing::warn!(service = %service, "Failed to read status output: {}", e);
        return buf;
    }
    if buf.len() as u64 > limit {
        tracing::warn!(
            service = %service,
            "Status output exceeds {} bytes, the rest is ignored",
            limit
        );
        buf.truncate(limit as usize);
        let mut rest = head.into_inner();
        if let Err(e) = tokio::io::copy(&mut rest, &mut tokio::io::sink()).await {
            tracing::warn!(service = %service, "Failed to read status output: {}", e);
        }
    }
    buf
}
