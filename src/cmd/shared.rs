/*!
Shared CLI helpers: configuration resolution, the blocking session wrapper
around the async client, and output helpers used by every subcommand.
*/

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use boostwrap::{Boost, Config};
use serde::Serialize;
use tokio::runtime::Runtime;

use crate::cmd::format::{Role, StyleOptions, color, emoji};
use crate::utils::monotonic_ms;

/// Options every subcommand sees (from the top-level parser).
#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub bin: Option<String>,
    pub config: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub json: bool,
}

/// Defaults < config file < environment < flags.
pub fn resolve_config(globals: &Globals) -> Result<Config> {
    let mut cfg = match &globals.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    cfg.apply_env().context("invalid environment override")?;
    if let Some(spec) = &globals.bin {
        cfg.apply_binary_spec(spec)
            .with_context(|| format!("invalid --bin '{spec}'"))?;
    }
    if let Some(secs) = globals.timeout {
        cfg.timeout_secs = Some(secs);
    }
    Ok(cfg)
}

/// A client plus the runtime that drives it. Every call blocks.
pub struct Session {
    rt: Runtime,
    boost: Boost,
    pub json: bool,
    pub style: StyleOptions,
}

impl Session {
    pub fn open(globals: &Globals) -> Result<Self> {
        let cfg = resolve_config(globals)?;
        tracing::debug!(binary = %cfg.binary, args = ?cfg.args, timeout = ?cfg.timeout(), "resolved config");
        let ctx = cfg.context()?;
        let rt = Runtime::new().context("Failed to create Tokio runtime")?;
        Ok(Self {
            rt,
            boost: Boost::from_context(ctx),
            json: globals.json,
            style: StyleOptions::detect(),
        })
    }

    pub fn boost(&self) -> &Boost {
        &self.boost
    }

    /// Run one client call to completion. Returns the value and elapsed ms.
    pub fn block_on<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = boostwrap::Result<T>>,
    ) -> Result<(T, u128)> {
        let started = monotonic_ms();
        let value = self
            .rt
            .block_on(fut)
            .with_context(|| format!("{operation} failed"))?;
        Ok((value, monotonic_ms() - started))
    }

    /// Report an operation with no result record.
    pub fn done(&self, operation: &str, elapsed_ms: u128, message: &str) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({
                    "status": "ok",
                    "operation": operation,
                    "elapsed_ms": elapsed_ms,
                })
            );
        } else {
            println!(
                "{} {}",
                color(Role::Success, emoji("success", &self.style), &self.style),
                message
            );
        }
    }

    /// Report a result record as `{"status":"ok","operation":..,"result":..}`.
    pub fn json_result<T: Serialize>(&self, operation: &str, elapsed_ms: u128, result: &T) {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "operation": operation,
                "elapsed_ms": elapsed_ms,
                "result": result,
            })
        );
    }
}

/// clap value parser for `--http-url`.
pub fn parse_http_url(raw: &str) -> std::result::Result<String, String> {
    let parsed = url::Url::parse(raw).map_err(|e| format!("invalid URL '{raw}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(format!("unsupported scheme '{other}' (expected http or https)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_schemes() {
        assert!(parse_http_url("https://files.example/a.car").is_ok());
        assert!(parse_http_url("http://10.0.0.1:8080/x").is_ok());
        assert!(parse_http_url("ftp://files.example/a.car").is_err());
        assert!(parse_http_url("not a url").is_err());
    }

    #[test]
    fn bin_flag_wins_over_defaults() {
        let globals = Globals {
            bin: Some("/opt/boost --repo /r".into()),
            timeout: Some(9),
            ..Default::default()
        };
        let cfg = resolve_config(&globals).unwrap();
        assert_eq!(cfg.binary, "/opt/boost");
        assert_eq!(cfg.args, vec!["--repo", "/r"]);
        assert_eq!(cfg.timeout_secs, Some(9));
    }

    #[test]
    fn config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boostwrap.yaml");
        std::fs::write(&path, "binary: /from/file\ntimeout_secs: 4\n").unwrap();
        let globals = Globals {
            config: Some(path),
            bin: Some("/from/flag".into()),
            ..Default::default()
        };
        let cfg = resolve_config(&globals).unwrap();
        assert_eq!(cfg.binary, "/from/flag");
        assert_eq!(cfg.timeout_secs, Some(4));
    }

    #[test]
    fn missing_config_file_errors() {
        let globals = Globals {
            config: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..Default::default()
        };
        assert!(resolve_config(&globals).is_err());
    }
}
