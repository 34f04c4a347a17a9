//! Clean commands - remove transient files and outputs

use crate::context::Context;
use crate::output;
use anyhow::Result;
use latexlab_core::clean::{CleanAction, CleanMode, CleanReport, CleanScope, clean};
use latexlab_core::format::Format;

/// `clean`: transient byproducts only
pub fn run_transient(ctx: &Context) -> Result<()> {
    let report = clean(&ctx.workspace(), CleanScope::Transient, CleanMode::Conditional)?;
    print_report(ctx, &report);
    Ok(())
}

/// `clean-ps` / `clean-pdf` and `wipe-ps` / `wipe-pdf`
pub fn run_format(ctx: &Context, format: Format, mode: CleanMode) -> Result<()> {
    let ws = ctx.workspace();
    let scope = CleanScope::for_format(ws.roles(), format);
    let report = clean(&ws, scope, mode)?;
    print_report(ctx, &report);
    Ok(())
}

/// `cleanup` / `wipe-all`: every tier
pub fn run_all(ctx: &Context, mode: CleanMode) -> Result<()> {
    let report = clean(&ctx.workspace(), CleanScope::Secondary, mode)?;
    print_report(ctx, &report);
    Ok(())
}

fn print_report(ctx: &Context, report: &CleanReport) {
    for entry in &report.entries {
        let name = entry
            .path
            .strip_prefix(&ctx.dir)
            .unwrap_or(&entry.path)
            .display();
        match &entry.action {
            CleanAction::Removed => output::step(&format!("Removed {}", name)),
            CleanAction::Skipped => output::skipped(&format!("Would remove {}", name)),
            CleanAction::Kept => output::skipped(&format!("Kept {} (no source)", name)),
            CleanAction::Failed(reason) => {
                output::failed(&format!("Could not remove {}: {}", name, reason))
            }
        }
    }

    let removed = report.removed().len();
    if removed == 0 {
        output::done("Nothing to remove");
    } else {
        output::done(&format!(
            "Removed {} file{}",
            removed,
            if removed == 1 { "" } else { "s" }
        ));
    }
}
