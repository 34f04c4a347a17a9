//! Integration tests for doctor command

#![allow(deprecated)]

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use latexlab_testkit::temp_dir_in_workspace;
use predicates::prelude::*;
use std::process::Command;

fn latexlab() -> Command {
    let mut cmd = Command::cargo_bin("latexlab").unwrap();
    cmd.env_remove("LATEXLAB_USE_PDF")
        .env_remove("LATEXLAB_RM");
    cmd
}

fn doctor_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("doctor").arg("--json").output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("doctor --json should print JSON")
}

fn check<'a>(json: &'a serde_json::Value, id: &str) -> &'a serde_json::Value {
    json["checks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == id)
        .unwrap_or_else(|| panic!("missing check {id}"))
}

#[test]
fn test_doctor_json_schema() {
    let temp = temp_dir_in_workspace();

    let json = doctor_json(latexlab().current_dir(temp.path()));

    assert_eq!(json["schema_version"], "1.0");
    assert!(json["timestamp"].is_string());
    assert_eq!(json["primary"], "pdf");
    assert_eq!(check(&json, "config_valid")["status"], "ok");
    for id in [
        "tool_latex",
        "tool_pdflatex",
        "tool_dvips",
        "tool_ps2pdf",
        "tool_pdf2ps",
        "tool_git",
    ] {
        check(&json, id);
    }
}

#[test]
fn test_doctor_missing_required_tool_is_error() {
    let temp = temp_dir_in_workspace();

    let json = doctor_json(
        latexlab()
            .current_dir(temp.path())
            .env("LATEXLAB_PDFLATEX", "no-such-pdflatex-binary")
            .env("LATEXLAB_LATEX", "no-such-latex-binary"),
    );

    // pdflatex is used by the PDF-first pipeline, latex is not
    assert_eq!(check(&json, "tool_pdflatex")["status"], "error");
    assert_eq!(check(&json, "tool_latex")["status"], "warning");
}

#[test]
#[cfg(unix)]
fn test_doctor_reports_found_tool_path() {
    let temp = temp_dir_in_workspace();
    let toolchain = latexlab_testkit::FakeToolchain::install(temp.path());

    let json = doctor_json(
        latexlab()
            .current_dir(temp.path())
            .envs(toolchain.envs()),
    );

    let pdflatex = check(&json, "tool_pdflatex");
    assert_eq!(pdflatex["status"], "ok");
    let path = pdflatex["details"]["path"].as_str().unwrap();
    assert!(path.ends_with("bin/pdflatex"), "{path}");
}

#[test]
fn test_doctor_invalid_config_still_exits_0() {
    let temp = temp_dir_in_workspace();
    std::fs::write(temp.path().join("latexlab.toml"), "use_pdf = \"perhaps\"\n").unwrap();

    let json = doctor_json(latexlab().current_dir(temp.path()));

    assert_eq!(check(&json, "config_valid")["status"], "error");
    assert_eq!(json["checks"].as_array().unwrap().len(), 1);
}

#[test]
fn test_doctor_human_output() {
    let temp = temp_dir_in_workspace();

    latexlab()
        .current_dir(temp.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Toolchain Health Check"))
        .stdout(predicate::str::contains("PDF typesetter"));
}
