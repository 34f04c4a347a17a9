//! CLI surface tests: help, version, argument and configuration errors

#![allow(deprecated)]

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use latexlab_testkit::temp_dir_in_workspace;
use predicates::prelude::*;
use std::process::Command;

fn latexlab() -> Command {
    let mut cmd = Command::cargo_bin("latexlab").unwrap();
    cmd.env_remove("LATEXLAB_USE_PDF")
        .env_remove("LATEXLAB_SOURCE")
        .env_remove("LATEXLAB_RM");
    cmd
}

#[test]
fn test_help_lists_commands() {
    latexlab()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("clean-ps"))
        .stdout(predicate::str::contains("wipe-all"))
        .stdout(predicate::str::contains("cleanup"))
        .stdout(predicate::str::contains("backup"));
}

#[test]
fn test_help_flag_shows_global_options() {
    latexlab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--use-pdf"))
        .stdout(predicate::str::contains("LATEXLAB_USE_PDF"));
}

#[test]
fn test_version() {
    latexlab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("latexlab"));
}

#[test]
fn test_unknown_command_is_rejected() {
    latexlab().arg("publish").assert().failure();
}

#[test]
fn test_invalid_use_pdf_exits_2() {
    let temp = temp_dir_in_workspace();

    latexlab()
        .current_dir(temp.path())
        .args(["--use-pdf", "maybe", "clean"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("CONFIG_INVALID_VALUE"));
}

#[test]
fn test_invalid_config_file_exits_2() {
    let temp = temp_dir_in_workspace();
    std::fs::write(temp.path().join("latexlab.toml"), "use_pdf = [").unwrap();

    latexlab()
        .current_dir(temp.path())
        .arg("clean")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("CONFIG_PARSE_ERROR"));
}

#[test]
fn test_missing_explicit_config_exits_2() {
    let temp = temp_dir_in_workspace();

    latexlab()
        .current_dir(temp.path())
        .args(["--config", "other.toml", "clean"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("CONFIG_NOT_FOUND"));
}

#[test]
fn test_missing_directory_fails() {
    let temp = temp_dir_in_workspace();

    latexlab()
        .current_dir(temp.path())
        .args(["-C", "does-not-exist", "clean"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_missing_git_exits_2() {
    let temp = temp_dir_in_workspace();

    latexlab()
        .current_dir(temp.path())
        .args(["--git", "no-such-git-binary", "backup"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("MISSING_TOOL"));

    assert!(!temp.path().join(".latexlab-backup").exists());
}
