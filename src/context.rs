//! Command context: binary + persistent argument prefix + invoker.
//!
//! A context is built once per session and never mutated afterwards. Every
//! invocation goes out as
//!
//! ```text
//! <binary> <persistent args...> --json <subcommand path...> <rendered args...>
//! ```
//!
//! so output is always machine readable. Concurrent callers share the
//! context by reference; each call spawns its own subprocess.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::invoker::{Invocation, ProcessRunner, Runner};
use crate::{Error, Result};

/// Flag forcing JSON output; present exactly once among the persistent
/// arguments (appended unless the caller already supplied it).
pub const JSON_FLAG: &str = "--json";

pub struct CommandContext<R = ProcessRunner> {
    binary: PathBuf,
    persistent_args: Vec<String>,
    runner: Arc<R>,
    timeout: Option<Duration>,
}

impl CommandContext<ProcessRunner> {
    /// Context that spawns real processes.
    pub fn new<I, S>(binary: impl Into<PathBuf>, persistent_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_runner_and_args(binary, persistent_args, ProcessRunner)
    }
}

impl<R: Runner> CommandContext<R> {
    /// Context using `runner` to execute the binary.
    pub fn with_runner_and_args<I, S>(
        binary: impl Into<PathBuf>,
        persistent_args: I,
        runner: R,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut persistent_args: Vec<String> =
            persistent_args.into_iter().map(Into::into).collect();
        if !persistent_args.iter().any(|a| a == JSON_FLAG) {
            persistent_args.push(JSON_FLAG.to_string());
        }

        Self {
            binary: binary.into(),
            persistent_args,
            runner: Arc::new(runner),
            timeout: None,
        }
    }

    /// Same binary and prefix, different invoker.
    pub fn with_runner<R2: Runner>(self, runner: R2) -> CommandContext<R2> {
        CommandContext {
            binary: self.binary,
            persistent_args: self.persistent_args,
            runner: Arc::new(runner),
            timeout: self.timeout,
        }
    }

    /// Bound every invocation made through this context.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn persistent_args(&self) -> &[String] {
        &self.persistent_args
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Full argument vector (without argv[0]) for one invocation.
    pub fn argv(&self, subcommand: &[&str], extra: &[String]) -> Vec<String> {
        let mut argv =
            Vec::with_capacity(self.persistent_args.len() + subcommand.len() + extra.len());
        argv.extend(self.persistent_args.iter().cloned());
        argv.extend(subcommand.iter().map(|s| s.to_string()));
        argv.extend(extra.iter().cloned());
        argv
    }

    /// Spawn the binary once and wait for it.
    ///
    /// A non-zero exit becomes [`Error::Execution`] with the captured output
    /// attached.
    pub async fn invoke(&self, subcommand: &[&str], extra: &[String]) -> Result<Invocation> {
        let argv = self.argv(subcommand, extra);
        let program = self.binary.display().to_string();
        debug!(program = %program, argv = ?argv, "invoking");

        let invocation = self.runner.run(&self.binary, &argv, self.timeout).await?;
        debug!(
            program = %program,
            exit_code = ?invocation.exit_code,
            bytes = invocation.output.len(),
            "invocation finished"
        );

        if invocation.success() {
            Ok(invocation)
        } else {
            Err(Error::Execution {
                program,
                code: invocation.exit_code,
                output: invocation.output,
            })
        }
    }
}

impl<R> Clone for CommandContext<R> {
    fn clone(&self) -> Self {
        Self {
            binary: self.binary.clone(),
            persistent_args: self.persistent_args.clone(),
            runner: Arc::clone(&self.runner),
            timeout: self.timeout,
        }
    }
}

impl<R> fmt::Debug for CommandContext<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("binary", &self.binary)
            .field("persistent_args", &self.persistent_args)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
