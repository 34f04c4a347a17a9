//! Doctor command - toolchain health check

use crate::cli::GlobalArgs;
use crate::context::Context;
use crate::output;
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use latexlab_core::config::RemoveCommand;
use latexlab_core::format::Format;
use latexlab_core::tools::{ProcessRunner, ToolCommand, ToolRunner};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Doctor command JSON output schema
#[derive(Debug, Serialize, Deserialize)]
struct DoctorOutput {
    schema_version: String,
    directory: String,
    primary: String,
    timestamp: String,
    checks: Vec<Check>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Check {
    id: String,
    name: String,
    status: CheckStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

/// Run toolchain health check
///
/// Always returns Ok(()) - doctor command always exits 0
pub fn run(args: &GlobalArgs, ctx_result: Result<Context>, json: bool) -> Result<()> {
    let mut checks = Vec::new();
    let (directory, primary) = match &ctx_result {
        Ok(ctx) => {
            checks.push(Check {
                id: "config_valid".to_string(),
                name: "Configuration".to_string(),
                status: CheckStatus::Ok,
                message: "configuration is valid".to_string(),
                details: None,
            });
            (
                ctx.dir.display().to_string(),
                ctx.config.roles().primary.extension().to_string(),
            )
        }
        Err(e) => {
            checks.push(Check {
                id: "config_valid".to_string(),
                name: "Configuration".to_string(),
                status: CheckStatus::Error,
                message: format!("Failed to load configuration: {}", e),
                details: None,
            });
            let dir = args
                .dir
                .clone()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| ".".into());
            (dir.display().to_string(), "unknown".to_string())
        }
    };

    if let Ok(ctx) = &ctx_result {
        checks.extend(tool_checks(ctx));
    }

    let report = DoctorOutput {
        schema_version: "1.0".to_string(),
        directory,
        primary,
        timestamp: Utc::now().to_rfc3339(),
        checks,
    };

    if json {
        output::print_json(&serde_json::to_string_pretty(&report)?)?;
    } else {
        print_human_readable(&report);
    }

    Ok(())
}

/// One check per configured tool; tools the current pipeline never calls
/// only warn when missing
fn tool_checks(ctx: &Context) -> Vec<Check> {
    let roles = ctx.config.roles();
    let tools = &ctx.config.tools;
    let pdf_first = roles.primary == Format::Pdf;

    let mut roles_to_check = vec![
        ("latex", "DVI typesetter", tools.latex.clone(), !pdf_first),
        ("pdflatex", "PDF typesetter", tools.pdflatex.clone(), pdf_first),
        ("dvips", "DVI to PostScript", tools.dvips.clone(), !pdf_first),
        ("ps2pdf", "PostScript to PDF", tools.ps2pdf.clone(), !pdf_first),
        ("pdf2ps", "PDF to PostScript", tools.pdf2ps.clone(), pdf_first),
        ("git", "Backup (git)", tools.git.clone(), false),
    ];
    if let RemoveCommand::External(command) = &ctx.config.remove {
        roles_to_check.push(("rm", "File removal", command.clone(), true));
    }

    roles_to_check
        .into_iter()
        .map(|(role, name, value, required)| tool_check(ctx, role, name, &value, required))
        .collect()
}

fn tool_check(ctx: &Context, role: &str, name: &str, value: &str, required: bool) -> Check {
    let id = format!("tool_{}", role);
    let command = match ToolCommand::parse(role, value) {
        Ok(command) => command,
        Err(e) => {
            return Check {
                id,
                name: name.to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
                details: None,
            };
        }
    };

    let mut details = HashMap::new();
    details.insert(
        "command".to_string(),
        serde_json::Value::String(command.to_string()),
    );

    match ProcessRunner.locate(&command.program, &ctx.dir) {
        Some(path) => {
            details.insert(
                "path".to_string(),
                serde_json::Value::String(path.display().to_string()),
            );
            Check {
                id,
                name: name.to_string(),
                status: CheckStatus::Ok,
                message: format!("{} found", command.program),
                details: Some(details),
            }
        }
        None => Check {
            id,
            name: name.to_string(),
            status: if required {
                CheckStatus::Error
            } else {
                CheckStatus::Warning
            },
            message: format!("{} not found in PATH", command.program),
            details: Some(details),
        },
    }
}

fn print_human_readable(report: &DoctorOutput) {
    println!("{}", "Toolchain Health Check".bold());
    println!();

    println!("  Directory: {}", report.directory);
    println!("  Primary format: {}", report.primary);
    println!();

    println!("{}", "Checks:".bold());
    for check in &report.checks {
        let status_str = match check.status {
            CheckStatus::Ok => "✓".green(),
            CheckStatus::Warning => "⚠".yellow(),
            CheckStatus::Error => "✗".red(),
        };

        println!("  {} {}: {}", status_str, check.name.bold(), check.message);

        if let Some(details) = &check.details {
            let mut keys: Vec<_> = details.keys().collect();
            keys.sort();
            for key in keys {
                println!("      {}: {}", key, details[key]);
            }
        }
    }

    println!();
    println!("Timestamp: {}", report.timestamp);
}
