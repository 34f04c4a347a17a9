//! Backup commands - snapshot, restore and list working directory snapshots

use crate::context::Context;
use crate::output;
use anyhow::Result;
use latexlab_core::snapshot;

pub fn backup(ctx: &Context) -> Result<()> {
    let ws = ctx.workspace();
    if ctx.verbose {
        output::step(&format!("Snapshotting {}", ws.dir().display()));
    }

    let outcome = snapshot::snapshot(&ws)?;
    if outcome.initialized {
        output::done(&format!(
            "Created backup repository {}",
            ws.backup_dir().display()
        ));
    }
    output::done(&format!("Saved {}", outcome.message));
    Ok(())
}

pub fn restore(ctx: &Context) -> Result<()> {
    let restored = snapshot::restore(&ctx.workspace())?;
    if restored.is_empty() {
        output::done("Nothing to restore");
        return Ok(());
    }

    for name in &restored {
        output::step(&format!("Restored {}", name));
    }
    output::done(&format!(
        "Restored {} file{}",
        restored.len(),
        if restored.len() == 1 { "" } else { "s" }
    ));
    Ok(())
}

pub fn history(ctx: &Context) -> Result<()> {
    for line in snapshot::history(&ctx.workspace())? {
        println!("{}", line);
    }
    Ok(())
}
