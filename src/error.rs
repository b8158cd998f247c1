//! Error taxonomy shared by the invoker, context and decoder.
//!
//! Nothing in the library recovers from these locally; every variant is
//! surfaced to the caller, who decides whether to retry, log or abort.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The binary could not be started (missing, not executable, ...).
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The binary ran but exited unsuccessfully. `code` is `None` when the
    /// process was terminated by a signal.
    #[error("'{program}' exited with {}", describe_code(.code))]
    Execution {
        program: String,
        code: Option<i32>,
        output: Vec<u8>,
    },

    #[error("failed to decode output as JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        output: Vec<u8>,
    },

    #[error("'{program}' did not finish within {after:?}")]
    Timeout { program: String, after: Duration },

    #[error("failed to capture output of '{program}': {source}")]
    Capture {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Captured output attached to the error, if any.
    ///
    /// Some operations report failures as a JSON payload on a non-zero exit,
    /// so callers may want to inspect it.
    pub fn output(&self) -> Option<&[u8]> {
        match self {
            Error::Execution { output, .. } | Error::Decode { output, .. } => Some(output),
            _ => None,
        }
    }

    pub fn is_launch(&self) -> bool {
        matches!(self, Error::Launch { .. })
    }

    pub fn is_execution(&self) -> bool {
        matches!(self, Error::Execution { .. })
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
