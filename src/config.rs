//! Session configuration: which binary to run, with which persistent
//! arguments, and how long to wait for it.
//!
//! Sources, lowest to highest precedence:
//!   1. defaults (`boost`, no extra args, no timeout)
//!   2. a YAML file (`Config::load`)
//!   3. environment: `BOOST_BIN`, `BOOST_TIMEOUT` (seconds)
//!   4. explicit overrides (CLI flags)
//!
//! A binary spec is a shell-style command line: `"boost --repo /data/boost"`
//! yields binary `boost` and persistent args `["--repo", "/data/boost"]`.
//! Applying a spec replaces both.
//!
//! Example file:
//!
//! ```yaml
//! binary: /usr/local/bin/boost
//! args: ["--repo", "/data/boost"]
//! timeout_secs: 120
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shell_words::split as shell_split;

use crate::context::CommandContext;
use crate::{Error, Result};

pub const BIN_ENV: &str = "BOOST_BIN";
pub const TIMEOUT_ENV: &str = "BOOST_TIMEOUT";
pub const DEFAULT_BINARY: &str = "boost";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub binary: String,
    /// Persistent arguments placed before every subcommand (`--json` is
    /// added by the context).
    pub args: Vec<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            args: Vec::new(),
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| Error::Config(format!("invalid config: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Replace binary and persistent args with a parsed binary spec.
    pub fn apply_binary_spec(&mut self, raw: &str) -> Result<()> {
        let (binary, args) = parse_binary_spec(raw)?;
        self.binary = binary;
        self.args = args;
        Ok(())
    }

    /// Apply `BOOST_BIN` / `BOOST_TIMEOUT` from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`. Blank values are
    /// ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(spec) = lookup(BIN_ENV).filter(|s| !s.trim().is_empty()) {
            self.apply_binary_spec(&spec)?;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|s| !s.trim().is_empty()) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("{TIMEOUT_ENV} must be whole seconds, got '{raw}': {e}"))
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// `None` and `Some(0)` both mean "wait forever".
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }

    /// Build the command context this configuration describes.
    pub fn context(&self) -> Result<CommandContext> {
        if self.binary.trim().is_empty() {
            return Err(Error::Config("binary must not be empty".to_string()));
        }
        let ctx = CommandContext::new(&self.binary, self.args.iter().cloned());
        Ok(ctx.with_timeout(self.timeout()))
    }
}

/// Split a shell-style command line into program and arguments.
pub fn parse_binary_spec(raw: &str) -> Result<(String, Vec<String>)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::Config("binary spec is empty".to_string()));
    }

    let mut parts = shell_split(trimmed)
        .map_err(|e| Error::Config(format!("failed to parse binary spec '{trimmed}': {e}")))?;
    if parts.is_empty() || parts[0].is_empty() {
        return Err(Error::Config(format!("no program name in binary spec '{trimmed}'")));
    }

    let program = parts.remove(0);
    Ok((program, parts))
}
