//! Integration tests for backup / restore / history against a real `git`

#![allow(deprecated)]

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use latexlab_testkit::{list_files, temp_dir_in_workspace};
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn latexlab(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("latexlab").unwrap();
    // isolate from the user's git configuration
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env_remove("LATEXLAB_GIT");
    cmd
}

#[test]
fn test_backup_restore_roundtrip() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }
    let temp = temp_dir_in_workspace();
    let doc = temp.path().join("doc");
    std::fs::create_dir(&doc).unwrap();
    std::fs::write(doc.join("paper.tex"), "\\documentclass{article}\n").unwrap();
    std::fs::write(doc.join("refs.bib"), "@book{x}\n").unwrap();

    latexlab(&doc)
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created backup repository"));
    assert!(doc.join(".latexlab-backup/HEAD").is_file());

    std::fs::remove_file(doc.join("refs.bib")).unwrap();

    latexlab(&doc)
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored refs.bib"));
    assert_eq!(list_files(&doc), vec!["paper.tex", "refs.bib"]);

    latexlab(&doc)
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to restore"));
}

#[test]
fn test_restore_non_ascii_file_name() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }
    let temp = temp_dir_in_workspace();
    std::fs::write(temp.path().join("paper.tex"), "x\n").unwrap();
    std::fs::write(temp.path().join("résumé.tex"), "y\n").unwrap();

    latexlab(temp.path()).arg("backup").assert().success();
    std::fs::remove_file(temp.path().join("résumé.tex")).unwrap();

    latexlab(temp.path())
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored résumé.tex"));

    assert_eq!(list_files(temp.path()), vec!["paper.tex", "résumé.tex"]);
    assert_eq!(
        std::fs::read_to_string(temp.path().join("résumé.tex")).unwrap(),
        "y\n"
    );
}

#[test]
fn test_history_lists_each_snapshot() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }
    let temp = temp_dir_in_workspace();
    std::fs::write(temp.path().join("paper.tex"), "x\n").unwrap();

    latexlab(temp.path()).arg("backup").assert().success();
    latexlab(temp.path()).arg("backup").assert().success();

    let output = latexlab(temp.path()).arg("history").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 2, "{stdout}");
    assert!(stdout.lines().all(|l| l.contains("snapshot ")));
}

#[test]
fn test_restore_without_backup_fails() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }
    let temp = temp_dir_in_workspace();

    latexlab(temp.path())
        .arg("restore")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NO_SNAPSHOTS"));
}
