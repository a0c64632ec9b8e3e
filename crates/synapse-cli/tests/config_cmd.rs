//! End-to-end checks for the `config` subcommands.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn synapse() -> Command {
    Command::cargo_bin("synapse").expect("binary builds")
}

#[test]
fn config_path_honors_synapse_home() {
    let home = tempdir().expect("tempdir");

    synapse()
        .env("SYNAPSE_HOME", home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains(home.path().to_str().unwrap()));
}

#[test]
fn config_init_creates_the_default_file() {
    let home = tempdir().expect("tempdir");

    synapse()
        .env("SYNAPSE_HOME", home.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents =
        std::fs::read_to_string(home.path().join("config.toml")).expect("config written");
    assert!(contents.contains("latency_ms = 1500"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let home = tempdir().expect("tempdir");

    synapse()
        .env("SYNAPSE_HOME", home.path())
        .args(["config", "init"])
        .assert()
        .success();

    synapse()
        .env("SYNAPSE_HOME", home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
