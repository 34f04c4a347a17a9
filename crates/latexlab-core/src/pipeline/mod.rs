//! Format pipeline: compile the primary format, convert to the secondary one
//!
//! ```text
//! PDF-first                         PostScript-first
//!   x.tex                             x.tex
//!     ↓ pdflatex ×2                     ↓ latex ×2
//!   x.pdf  (primary)                  x.dvi
//!     ↓ pdf2ps                          ↓ dvips -o x.ps x.dvi
//!   x.ps   (secondary)                x.ps   (primary)
//!                                       ↓ ps2pdf
//!                                     x.pdf  (secondary)
//! ```
//!
//! Every step is skipped when its output is not older than its input.

mod freshness;

pub use freshness::is_fresh;

use crate::error::{LatexlabError, Result};
use crate::format::{BuildTarget, Format};
use crate::source::{SourceDoc, resolve_sources};
use crate::tools::{Invocation, ensure_available, run_checked};
use crate::workspace::Workspace;
use log::info;
use std::path::PathBuf;

/// Number of typesetter passes; the second one picks up the cross-reference
/// data the first one wrote to `.aux`/`.toc`
pub const TYPESET_PASSES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Built(PathBuf),
    UpToDate(PathBuf),
}

impl BuildOutcome {
    pub fn output(&self) -> &PathBuf {
        match self {
            BuildOutcome::Built(path) | BuildOutcome::UpToDate(path) => path,
        }
    }

    pub fn was_built(&self) -> bool {
        matches!(self, BuildOutcome::Built(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub doc: SourceDoc,
    pub format: Format,
    pub outcome: BuildOutcome,
}

/// Resolve the sources for `format` and build each of them
pub fn build_format(ws: &Workspace<'_>, format: Format) -> Result<Vec<BuildReport>> {
    let roles = ws.roles();
    let target = roles.target_for(format);
    let docs = resolve_sources(ws.dir(), ws.config.source.as_deref(), target, roles)?;
    build(ws, &docs, target)
}

/// Build `target` for each document in order, stopping at the first failure
pub fn build(
    ws: &Workspace<'_>,
    docs: &[SourceDoc],
    target: BuildTarget,
) -> Result<Vec<BuildReport>> {
    let format = ws.roles().format_of(target);
    docs.iter()
        .map(|doc| {
            let outcome = match target {
                BuildTarget::Primary => build_primary(ws, doc)?,
                BuildTarget::Secondary => build_secondary(ws, doc)?,
            };
            Ok(BuildReport {
                doc: doc.clone(),
                format,
                outcome,
            })
        })
        .collect()
}

/// Typeset `doc` into the primary format
pub fn build_primary(ws: &Workspace<'_>, doc: &SourceDoc) -> Result<BuildOutcome> {
    let dir = ws.dir();
    let source = doc.tex_path(dir);
    if !source.is_file() {
        return Err(LatexlabError::SourceNotFound(format!(
            "{} does not exist in {}",
            doc.tex_name(),
            dir.display()
        )));
    }

    let primary = ws.roles().primary;
    let output = doc.output_path(dir, primary);
    if is_fresh(&output, &source)? {
        info!("{} is up to date", doc.output_name(primary));
        return Ok(BuildOutcome::UpToDate(output));
    }

    match primary {
        Format::Pdf => {
            let pdflatex = ws.pdflatex()?;
            ensure_available(ws.runner, &pdflatex.program, dir)?;
            typeset(ws, &Invocation::new(&pdflatex, dir).arg(doc.tex_name()))?;
        }
        Format::Ps => {
            let latex = ws.latex()?;
            let dvips = ws.dvips()?;
            ensure_available(ws.runner, &latex.program, dir)?;
            ensure_available(ws.runner, &dvips.program, dir)?;

            typeset(ws, &Invocation::new(&latex, dir).arg(doc.tex_name()))?;

            let dvi = format!("{}.dvi", doc.base);
            info!("converting {} to {}", dvi, doc.output_name(Format::Ps));
            run_checked(
                ws.runner,
                &Invocation::new(&dvips, dir)
                    .args(["-o".to_string(), doc.output_name(Format::Ps)])
                    .arg(dvi),
            )?;
        }
    }

    Ok(BuildOutcome::Built(output))
}

/// Convert `doc` into the secondary format, building the primary first
pub fn build_secondary(ws: &Workspace<'_>, doc: &SourceDoc) -> Result<BuildOutcome> {
    let dir = ws.dir();
    let roles = ws.roles();

    let converter = match roles.secondary {
        Format::Pdf => ws.ps2pdf()?,
        Format::Ps => ws.pdf2ps()?,
    };
    ensure_available(ws.runner, &converter.program, dir)?;

    let primary_outcome = build_primary(ws, doc)?;
    let primary_path = primary_outcome.output().clone();
    let output = doc.output_path(dir, roles.secondary);

    if !primary_outcome.was_built() && is_fresh(&output, &primary_path)? {
        info!("{} is up to date", doc.output_name(roles.secondary));
        return Ok(BuildOutcome::UpToDate(output));
    }

    info!(
        "converting {} to {}",
        doc.output_name(roles.primary),
        doc.output_name(roles.secondary)
    );
    run_checked(
        ws.runner,
        &Invocation::new(&converter, dir)
            .arg(doc.output_name(roles.primary))
            .arg(doc.output_name(roles.secondary)),
    )?;

    Ok(BuildOutcome::Built(output))
}

/// Run the typesetter exactly [`TYPESET_PASSES`] times
fn typeset(ws: &Workspace<'_>, invocation: &Invocation) -> Result<()> {
    for pass in 1..=TYPESET_PASSES {
        info!(
            "{} pass {}/{}",
            invocation.program, pass, TYPESET_PASSES
        );
        run_checked(ws.runner, invocation)?;
    }
    Ok(())
}
