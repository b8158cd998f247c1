//! Process invocation.
//!
//! [`Runner`] is the capability "run a program with these arguments and hand
//! back everything it printed". [`ProcessRunner`] is the real implementation
//! on top of `tokio::process`; [`crate::mock::MockRunner`] is the test double.
//!
//! A runner reports what happened (exit code + combined output). Turning a
//! non-zero exit into an error is left to the command context, and looking
//! inside the output is left to the decoder.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::trace;

use crate::{Error, Result};

/// Outcome of one completed subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Stdout and stderr interleaved in arrival order.
    pub output: Vec<u8>,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Output as text, replacing invalid UTF-8.
    pub fn output_lossy(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

#[async_trait]
pub trait Runner: Send + Sync {
    /// Run `program` with `args` (argv[0] is supplied by the runner) and wait
    /// for it to exit, giving up after `timeout` if one is set.
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<Invocation>;
}

/// Spawns real subprocesses.
///
/// Children are spawned with `kill_on_drop`, so a timeout or a dropped
/// future terminates the process instead of leaking it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl Runner for ProcessRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<Invocation> {
        let name = program.display().to_string();
        let completion = run_to_completion(program, args, &name);

        match timeout {
            Some(after) => tokio::time::timeout(after, completion)
                .await
                .map_err(|_| Error::Timeout {
                    program: name.clone(),
                    after,
                })?,
            None => completion.await,
        }
    }
}

async fn run_to_completion(program: &Path, args: &[String], name: &str) -> Result<Invocation> {
    let capture_err = |source: std::io::Error| Error::Capture {
        program: name.to_string(),
        source,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| Error::Launch {
            program: name.to_string(),
            source,
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| capture_err(std::io::Error::other("stdout was not piped")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| capture_err(std::io::Error::other("stderr was not piped")))?;

    let output = read_combined(stdout, stderr).await.map_err(capture_err)?;
    let status = child.wait().await.map_err(capture_err)?;

    trace!(program = name, bytes = output.len(), status = ?status, "process exited");

    Ok(Invocation {
        exit_code: status.code(),
        output,
    })
}

/// Drain two streams into a single buffer, appending chunks as they arrive.
async fn read_combined<A, B>(mut first: A, mut second: B) -> std::io::Result<Vec<u8>>
where
    A: AsyncRead + Unpin,
    B: AsyncRead + Unpin,
{
    let mut output = Vec::new();
    let mut buf_a = [0u8; 4096];
    let mut buf_b = [0u8; 4096];
    let (mut a_open, mut b_open) = (true, true);

    while a_open || b_open {
        tokio::select! {
            read = first.read(&mut buf_a), if a_open => {
                match read? {
                    0 => a_open = false,
                    n => output.extend_from_slice(&buf_a[..n]),
                }
            }
            read = second.read(&mut buf_b), if b_open => {
                match read? {
                    0 => b_open = false,
                    n => output.extend_from_slice(&buf_b[..n]),
                }
            }
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn combined_reads_both_streams() {
        let out = read_combined(&b"{\"a\":"[..], &b"1}"[..]).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.len(), 7);
        assert!(text.contains("{\"a\":"));
        assert!(text.contains("1}"));
    }

    #[tokio::test]
    async fn combined_handles_empty_streams() {
        let out = read_combined(&b""[..], &b""[..]).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn missing_binary_is_launch_error() {
        let err = ProcessRunner
            .run(Path::new("/definitely/not/a/boost/binary"), &[], None)
            .await
            .unwrap_err();
        assert!(err.is_launch(), "unexpected error: {err}");
    }

    #[test]
    fn invocation_success_flag() {
        let ok = Invocation {
            exit_code: Some(0),
            output: b"{}".to_vec(),
        };
        assert!(ok.success());
        assert_eq!(ok.output_lossy(), "{}");
        assert!(!Invocation::default().success());
    }
}
