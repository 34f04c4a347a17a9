//! Artifact cleanup
//!
//! Two tiers: transient byproducts are always removed; outputs are removed
//! only while their `.tex` still exists (or unconditionally in wipe mode).
//! A run walks `transient → primary → secondary`, stopping at the requested
//! scope. Removal is best effort: a failed file is recorded and the run
//! carries on.

mod remover;

pub use remover::Remover;

use crate::error::Result;
use crate::format::{BuildTarget, Format, FormatRoles};
use crate::source::{SourceDoc, scan_bases};
use crate::workspace::Workspace;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Extensions of byproducts that are always safe to delete
pub const TRANSIENT_EXTENSIONS: &[&str] = &[
    "aux",
    "log",
    "toc",
    "lof",
    "lot",
    "out",
    "bbl",
    "blg",
    "dvi",
    "idx",
    "ilg",
    "ind",
    "nav",
    "snm",
    "vrb",
    "fls",
    "fdb_latexmk",
    "synctex.gz",
    "bak",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanScope {
    /// Byproducts only
    Transient,
    /// Byproducts and primary outputs
    Primary,
    /// Byproducts, primary and secondary outputs
    Secondary,
}

impl CleanScope {
    /// Scope reached when cleaning `format`
    pub fn for_format(roles: FormatRoles, format: Format) -> Self {
        match roles.target_for(format) {
            BuildTarget::Primary => CleanScope::Primary,
            BuildTarget::Secondary => CleanScope::Secondary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanMode {
    /// Keep outputs whose source is gone
    Conditional,
    /// Delete outputs regardless of sources
    Wipe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanAction {
    Removed,
    /// Remover is a no-op; the file would have been removed
    Skipped,
    /// Output without a source, left alone
    Kept,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanEntry {
    pub path: PathBuf,
    pub action: CleanAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub entries: Vec<CleanEntry>,
}

impl CleanReport {
    fn push(&mut self, path: PathBuf, action: CleanAction) {
        self.entries.push(CleanEntry { path, action });
    }

    fn extend(&mut self, other: CleanReport) {
        self.entries.extend(other.entries);
    }

    pub fn paths_with(&self, action: &CleanAction) -> Vec<&Path> {
        self.entries
            .iter()
            .filter(|e| &e.action == action)
            .map(|e| e.path.as_path())
            .collect()
    }

    pub fn removed(&self) -> Vec<&Path> {
        self.paths_with(&CleanAction::Removed)
    }

    pub fn kept(&self) -> Vec<&Path> {
        self.paths_with(&CleanAction::Kept)
    }

    pub fn failures(&self) -> Vec<&CleanEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.action, CleanAction::Failed(_)))
            .collect()
    }
}

/// Run the cleanup cascade up to `scope`
pub fn clean(ws: &Workspace<'_>, scope: CleanScope, mode: CleanMode) -> Result<CleanReport> {
    let roles = ws.roles();
    let mut report = clean_transient(ws)?;

    if matches!(scope, CleanScope::Primary | CleanScope::Secondary) {
        report.extend(clean_tier(ws, roles.primary, mode)?);
    }
    if scope == CleanScope::Secondary {
        report.extend(clean_tier(ws, roles.secondary, mode)?);
    }

    Ok(report)
}

fn clean_tier(ws: &Workspace<'_>, format: Format, mode: CleanMode) -> Result<CleanReport> {
    match mode {
        CleanMode::Conditional => clean_outputs(ws, format),
        CleanMode::Wipe => wipe_outputs(ws, format),
    }
}

/// Remove every transient byproduct, whatever sources exist
pub fn clean_transient(ws: &Workspace<'_>) -> Result<CleanReport> {
    info!("removing transient files");
    let remover = Remover::from_workspace(ws)?;
    let mut report = CleanReport::default();

    for name in file_names(ws.dir())? {
        if is_transient(&name) {
            let path = ws.dir().join(&name);
            let action = remove_one(&remover, &path);
            report.push(path, action);
        }
    }

    Ok(report)
}

/// Remove `*.<format>` files whose `.tex` still exists; keep the rest
pub fn clean_outputs(ws: &Workspace<'_>, format: Format) -> Result<CleanReport> {
    info!("removing .{} outputs that have a source", format.extension());
    let remover = Remover::from_workspace(ws)?;
    let mut report = CleanReport::default();

    for base in scan_bases(ws.dir(), format.extension())? {
        let doc = SourceDoc::new(base);
        let path = doc.output_path(ws.dir(), format);
        if doc.tex_path(ws.dir()).is_file() {
            let action = remove_one(&remover, &path);
            report.push(path, action);
        } else {
            info!("leaving {} alone: no {}", path.display(), doc.tex_name());
            report.push(path, CleanAction::Kept);
        }
    }

    Ok(report)
}

/// Remove every `*.<format>` file
pub fn wipe_outputs(ws: &Workspace<'_>, format: Format) -> Result<CleanReport> {
    info!("wiping all .{} outputs", format.extension());
    let remover = Remover::from_workspace(ws)?;
    let mut report = CleanReport::default();

    for base in scan_bases(ws.dir(), format.extension())? {
        let path = SourceDoc::new(base).output_path(ws.dir(), format);
        let action = remove_one(&remover, &path);
        report.push(path, action);
    }

    Ok(report)
}

pub fn is_transient(name: &str) -> bool {
    if name.ends_with('~') {
        return true;
    }
    TRANSIENT_EXTENSIONS.iter().any(|ext| {
        name.strip_suffix(ext)
            .and_then(|rest| rest.strip_suffix('.'))
            .is_some_and(|base| !base.is_empty())
    })
}

fn remove_one(remover: &Remover<'_>, path: &Path) -> CleanAction {
    match remover.remove(path) {
        Ok(true) => CleanAction::Removed,
        Ok(false) => CleanAction::Skipped,
        Err(e) => {
            warn!("could not remove {}: {}", path.display(), e);
            CleanAction::Failed(e.to_string())
        }
    }
}

fn file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}
