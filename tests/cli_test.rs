//! Integration tests for the pitch binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pitch() -> Command {
    let mut cmd = Command::new(cargo_bin("pitch"));
    cmd.env_remove("PITCH_MARKER_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    pitch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision this machine"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("variants"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    pitch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_lists_variants_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let output = pitch().arg("variants").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let pi = stdout.find("raspberry-pi").ok_or("raspberry-pi missing")?;
    let debian = stdout.find("debian").ok_or("debian missing")?;
    assert!(pi < debian);
    assert!(stdout.contains("freebsd"));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    pitch().arg("frobnicate").assert().failure();
    Ok(())
}

#[test]
fn cli_missing_explicit_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    pitch()
        .args(["run", "--non-interactive", "-c"])
        .arg(temp.path().join("absent.yml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("pitch.yml"), "app_name: [broken\n")?;
    pitch()
        .args(["run", "--non-interactive", "-p"])
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[cfg(target_os = "linux")]
mod linux {
    use super::*;

    fn debian_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("etc")).unwrap();
        fs::write(temp.path().join("etc/debian_version"), "12.5\n").unwrap();
        temp
    }

    #[test]
    fn detect_reports_no_match_on_empty_root() -> Result<(), Box<dyn std::error::Error>> {
        let markers = TempDir::new()?;
        pitch()
            .arg("detect")
            .env("PITCH_MARKER_ROOT", markers.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("no matching variant"));
        Ok(())
    }

    #[test]
    fn detect_json_names_the_variant() -> Result<(), Box<dyn std::error::Error>> {
        let markers = debian_root();
        let output = pitch()
            .args(["detect", "--json", "--hint", "rpi"])
            .env("PITCH_MARKER_ROOT", markers.path())
            .output()?;
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(value["variant"], "raspberry-pi");
        assert_eq!(value["profile"], "headless");
        Ok(())
    }

    #[test]
    fn run_on_unrecognized_host_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        let markers = TempDir::new()?;
        pitch()
            .args(["run", "--non-interactive", "-p"])
            .arg(project.path())
            .env("PITCH_MARKER_ROOT", markers.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No provisioning variant"));
        assert!(!project.path().join(".venv").exists());
        Ok(())
    }

    #[test]
    fn bare_invocation_runs() -> Result<(), Box<dyn std::error::Error>> {
        let project = TempDir::new()?;
        let markers = TempDir::new()?;
        pitch()
            .current_dir(project.path())
            .env("PITCH_MARKER_ROOT", markers.path())
            .env("CI", "true")
            .assert()
            .success()
            .stdout(predicate::str::contains("No provisioning variant"));
        Ok(())
    }
}
