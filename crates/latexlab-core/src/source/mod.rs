//! Source resolution: decide which `.tex` document(s) to act on

use crate::error::{LatexlabError, Result};
use crate::format::{BuildTarget, Format, FormatRoles};
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};

pub const TEX_EXTENSION: &str = "tex";

/// A source document, identified by its base name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceDoc {
    pub base: String,
}

impl SourceDoc {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Accepts `paper` or `paper.tex`
    pub fn from_name(name: &str) -> Self {
        let base = name
            .strip_suffix(".tex")
            .filter(|b| !b.is_empty())
            .unwrap_or(name);
        Self::new(base)
    }

    pub fn tex_name(&self) -> String {
        format!("{}.{}", self.base, TEX_EXTENSION)
    }

    pub fn output_name(&self, format: Format) -> String {
        format!("{}.{}", self.base, format.extension())
    }

    pub fn tex_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.tex_name())
    }

    pub fn output_path(&self, dir: &Path, format: Format) -> PathBuf {
        dir.join(self.output_name(format))
    }
}

impl fmt::Display for SourceDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tex_name())
    }
}

/// Base names of regular files in `dir` ending in `.<extension>`, sorted
pub fn scan_bases(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let suffix = format!(".{}", extension);
    let mut bases = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(base) = name.strip_suffix(&suffix) {
            if !base.is_empty() {
                bases.push(base.to_string());
            }
        }
    }

    bases.sort();
    Ok(bases)
}

/// Resolve the documents a build acts on
///
/// An explicit, non-blank `explicit` value wins and may name several
/// documents. Otherwise `dir` must hold exactly one `.tex`, except that a
/// secondary build may pick the single source that already has a primary
/// output next to it.
pub fn resolve_sources(
    dir: &Path,
    explicit: Option<&str>,
    target: BuildTarget,
    roles: FormatRoles,
) -> Result<Vec<SourceDoc>> {
    if let Some(explicit) = explicit.filter(|s| !s.trim().is_empty()) {
        let docs: Vec<SourceDoc> = explicit
            .split_whitespace()
            .map(SourceDoc::from_name)
            .collect();
        for doc in &docs {
            if doc.base.contains(std::path::is_separator) {
                return Err(LatexlabError::SourceNotFound(format!(
                    "configured source '{}' must be a file name in {}, not a path",
                    doc.tex_name(),
                    dir.display()
                )));
            }
            if !doc.tex_path(dir).is_file() {
                return Err(LatexlabError::SourceNotFound(format!(
                    "configured source '{}' does not exist in {}",
                    doc.tex_name(),
                    dir.display()
                )));
            }
        }
        debug!("using configured source(s): {}", explicit);
        return Ok(docs);
    }

    let sources = scan_bases(dir, TEX_EXTENSION)?;
    match sources.len() {
        0 => Err(LatexlabError::SourceNotFound(format!(
            "no .tex file in {}",
            dir.display()
        ))),
        1 => {
            debug!("single source found: {}.tex", sources[0]);
            Ok(vec![SourceDoc::new(sources[0].clone())])
        }
        _ => match target {
            BuildTarget::Primary => Err(ambiguous(&sources)),
            BuildTarget::Secondary => disambiguate_by_primary(dir, &sources, roles.primary)
                .map(|doc| vec![doc]),
        },
    }
}

/// Pick the only source that already has a primary output
fn disambiguate_by_primary(dir: &Path, sources: &[String], primary: Format) -> Result<SourceDoc> {
    let built = scan_bases(dir, primary.extension())?;
    let paired: Vec<&String> = built
        .iter()
        .filter(|base| sources.binary_search(*base).is_ok())
        .collect();

    debug!(
        "disambiguating {} sources by existing .{} outputs: {:?}",
        sources.len(),
        primary.extension(),
        paired
    );

    match paired.as_slice() {
        [only] => Ok(SourceDoc::new((*only).clone())),
        _ => Err(ambiguous(sources)),
    }
}

fn ambiguous(sources: &[String]) -> LatexlabError {
    LatexlabError::AmbiguousSource {
        candidates: sources.iter().map(|b| format!("{}.tex", b)).collect(),
    }
}
