//! Build command - typeset sources into the requested format

use crate::context::Context;
use crate::output;
use anyhow::Result;
use latexlab_core::format::Format;
use latexlab_core::pipeline::{BuildOutcome, build_format};
use std::time::Instant;

/// Build `format`, or the primary format when `None`
pub fn run(ctx: &Context, format: Option<Format>) -> Result<()> {
    let ws = ctx.workspace();
    let format = format.unwrap_or(ws.roles().primary);

    if ctx.verbose {
        output::step(&format!(
            "Building {} in {}",
            format,
            ws.dir().display()
        ));
    }

    let start = Instant::now();
    let reports = match build_format(&ws, format) {
        Ok(reports) => reports,
        Err(e) => {
            output::failed(&format!("{} build failed", format));
            return Err(e.into());
        }
    };
    let elapsed = start.elapsed().as_millis();

    for report in &reports {
        let name = report.doc.output_name(report.format);
        match &report.outcome {
            BuildOutcome::Built(_) => {
                output::done(&format!("Built {} from {} ({}ms)", name, report.doc, elapsed))
            }
            BuildOutcome::UpToDate(_) => output::done(&format!("{} is up to date", name)),
        }
    }

    Ok(())
}
