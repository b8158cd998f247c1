//! Binary-level tests: flag parsing, config resolution, output shapes.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Fake program dispatching on `$2 $3` (`$1` is always `--json`).
fn fake_boost(dir: &TempDir) -> String {
    let path = dir.path().join("boost.sh");
    let calls = dir.path().join("calls");
    let script = format!(
        r#"echo "$@" >> '{calls}'
case "$2 $3" in
  "wallet default") printf '{{"Address":"f1default"}}' ;;
  "wallet list") printf '[{{"Address":"f1a","Balance":"12","Default":true,"Nonce":4}}]' ;;
  "wallet delete") printf '{{"error":"insufficient funds"}}'; exit 1 ;;
  *) printf '{{}}' ;;
esac
"#,
        calls = calls.display()
    );
    std::fs::write(&path, script).unwrap();
    format!("/bin/sh {}", path.display())
}

fn boostwrap() -> Command {
    let mut cmd = Command::cargo_bin("boostwrap").unwrap();
    cmd.env_remove("BOOST_BIN")
        .env_remove("BOOST_TIMEOUT")
        .env("NO_COLOR", "1")
        .env("NO_EMOJI", "1");
    cmd
}

#[test]
fn ops_lists_catalog_as_json() {
    boostwrap()
        .args(["ops", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"wallet-balance""#))
        .stdout(predicate::str::contains(r#""name":"provider-retrieval-transports""#));
}

#[test]
fn wallet_default_json() {
    let dir = tempfile::tempdir().unwrap();
    boostwrap()
        .args(["--bin", &fake_boost(&dir), "wallet", "default", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status":"ok""#))
        .stdout(predicate::str::contains(r#""address":"f1default""#));
}

#[test]
fn wallet_list_human_table() {
    let dir = tempfile::tempdir().unwrap();
    boostwrap()
        .args(["--bin", &fake_boost(&dir), "wallet", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wallets (1)"))
        .stdout(predicate::str::contains("12 attoFIL"));
}

#[test]
fn bin_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    boostwrap()
        .env("BOOST_BIN", fake_boost(&dir))
        .args(["wallet", "default"])
        .assert()
        .success()
        .stdout(predicate::str::diff("f1default\n"));
}

#[test]
fn failure_reports_program_output() {
    let dir = tempfile::tempdir().unwrap();
    boostwrap()
        .args(["--bin", &fake_boost(&dir), "--json", "wallet", "delete", "f1a"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""status":"error""#))
        .stdout(predicate::str::contains("insufficient funds"));
}

#[test]
fn missing_binary_fails() {
    boostwrap()
        .args(["--bin", "/definitely/not/a/boost", "wallet", "default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn empty_set_default_never_runs_program() {
    let dir = tempfile::tempdir().unwrap();
    boostwrap()
        .args(["--bin", &fake_boost(&dir), "wallet", "set-default", ""])
        .assert()
        .success();
    assert!(!dir.path().join("calls").exists());
}

#[test]
fn config_file_supplies_binary() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("boost.sh");
    fake_boost(&dir);
    let cfg = dir.path().join("boostwrap.yaml");
    std::fs::write(
        &cfg,
        format!("binary: /bin/sh\nargs: [\"{}\"]\n", script.display()),
    )
    .unwrap();

    boostwrap()
        .arg("--config")
        .arg(&cfg)
        .args(["wallet", "default"])
        .assert()
        .success()
        .stdout(predicate::str::diff("f1default\n"));
}
