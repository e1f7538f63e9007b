// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Startup behavior of the binary itself.

use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

/// Command isolated from project config and ambient credentials.
fn reviewdeck(temp: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("reviewdeck").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("REVIEWDECK_API_TOKEN")
        .env_remove("HF_TOKEN")
        .env_remove("HUGGINGFACEHUB_API_TOKEN")
        .env("XDG_CONFIG_HOME", temp.path())
        .timeout(Duration::from_secs(20));
    cmd
}

#[test]
fn startup_without_token_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    reviewdeck(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("token"));
}

#[test]
fn config_subcommand_without_token_fails() {
    let temp = tempfile::tempdir().unwrap();
    reviewdeck(&temp)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("token"));
}

#[test]
fn help_works_without_credentials() {
    let temp = tempfile::tempdir().unwrap();
    reviewdeck(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"));
}

#[cfg(target_os = "linux")]
#[test]
fn init_creates_config_file() {
    let temp = tempfile::tempdir().unwrap();
    Command::cargo_bin("reviewdeck")
        .unwrap()
        .arg("init")
        .current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path())
        .timeout(Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));

    let path = temp.path().join("reviewdeck").join("config.toml");
    assert!(path.exists(), "expected {} to exist", path.display());
}
