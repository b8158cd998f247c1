//! In-memory [`Runner`] for tests.
//!
//! Responses are scripted up front and handed out in FIFO order; every call
//! is recorded so tests can assert on the exact argument vector (or on the
//! absence of any launch at all).

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::invoker::{Invocation, Runner};
use crate::{Error, Result};

/// What the mock does for one call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// The process "ran" and exited with `code`, printing `output`.
    Exit { code: i32, output: Vec<u8> },
    /// The binary could not be launched.
    LaunchFailure,
    /// The process never finished within the deadline.
    Timeout,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response. When the queue is empty, calls succeed with no output.
    pub fn push(&self, response: MockResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    /// Queue a successful exit printing `output`.
    pub fn push_output(&self, output: impl Into<Vec<u8>>) {
        self.push(MockResponse::Exit {
            code: 0,
            output: output.into(),
        });
    }

    /// Queue a successful exit printing `value` as JSON.
    pub fn push_json(&self, value: serde_json::Value) {
        self.push_output(value.to_string());
    }

    /// Queue a failing exit.
    pub fn push_exit(&self, code: i32, output: impl Into<Vec<u8>>) {
        self.push(MockResponse::Exit {
            code,
            output: output.into(),
        });
    }

    /// Chaining form of [`MockRunner::push`].
    pub fn with(self, response: MockResponse) -> Self {
        self.push(response);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of processes the mock was asked to start.
    pub fn launches(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Arguments of the most recent call.
    pub fn last_args(&self) -> Option<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|c| c.args.clone())
    }
}

#[async_trait]
impl Runner for MockRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<Invocation> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockCall {
                program: program.to_path_buf(),
                args: args.to_vec(),
                timeout,
            });

        let next = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        let name = program.display().to_string();
        match next {
            None => Ok(Invocation {
                exit_code: Some(0),
                output: Vec::new(),
            }),
            Some(MockResponse::Exit { code, output }) => Ok(Invocation {
                exit_code: Some(code),
                output,
            }),
            Some(MockResponse::LaunchFailure) => Err(Error::Launch {
                program: name,
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
            Some(MockResponse::Timeout) => Err(Error::Timeout {
                program: name,
                after: timeout.unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_are_fifo_and_calls_recorded() {
        let mock = MockRunner::new();
        mock.push_output("first");
        mock.push_exit(2, "second");

        let a = mock
            .run(Path::new("boost"), &["a".to_string()], None)
            .await
            .unwrap();
        let b = mock
            .run(Path::new("boost"), &["b".to_string()], None)
            .await
            .unwrap();

        assert_eq!(a.output, b"first");
        assert_eq!(b.exit_code, Some(2));
        assert_eq!(mock.launches(), 2);
        assert_eq!(mock.last_args(), Some(vec!["b".to_string()]));
    }

    #[tokio::test]
    async fn empty_queue_succeeds_silently() {
        let mock = MockRunner::new();
        let inv = mock.run(Path::new("boost"), &[], None).await.unwrap();
        assert!(inv.success());
        assert!(inv.output.is_empty());
    }

    #[tokio::test]
    async fn simulated_failures() {
        let mock = MockRunner::new()
            .with(MockResponse::LaunchFailure)
            .with(MockResponse::Timeout);

        let launch = mock.run(Path::new("boost"), &[], None).await.unwrap_err();
        assert!(launch.is_launch());

        let timeout = mock
            .run(Path::new("boost"), &[], Some(Duration::from_secs(3)))
            .await
            .unwrap_err();
        assert!(matches!(timeout, Error::Timeout { after, .. } if after == Duration::from_secs(3)));
    }
}
