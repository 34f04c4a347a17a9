//! Test utilities for latexlab
//!
//! This crate provides shared testing utilities used across the latexlab workspace.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This ensures all test temporary files are centralized in a single location
/// that is gitignored and easy to clean up manually if needed.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot be
/// created.
///
/// # Examples
///
/// ```rust
/// use latexlab_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("paper.tex");
/// std::fs::write(&file_path, "\\documentclass{article}").unwrap();
/// // Cleanup happens automatically when temp is dropped
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

/// Write `names` as small files in `dir`
pub fn touch_all(dir: &Path, names: &[&str]) {
    for name in names {
        std::fs::write(dir.join(name), format!("{name}\n")).expect("Failed to write fixture file");
    }
}

/// Sorted file names present in `dir`
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Write an executable `/bin/sh` script and return its absolute path
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");

    let mut perms = std::fs::metadata(&path)
        .expect("Failed to get metadata")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to set permissions");

    std::fs::canonicalize(&path).expect("Failed to canonicalize script path")
}

/// Environment variable that makes a fake tool exit with status 12
pub const FAKE_FAIL_ENV: &str = "FAKE_TEX_FAIL";

/// Shell stand-ins for the TeX toolchain
///
/// Every script appends `<tool> <args>` to a shared call log and writes the
/// output file the real tool would produce. Setting `FAKE_TEX_FAIL=<tool>`
/// makes that tool fail with exit status 12 before writing anything.
#[cfg(unix)]
pub struct FakeToolchain {
    pub bin_dir: PathBuf,
    pub log: PathBuf,
    pub latex: PathBuf,
    pub pdflatex: PathBuf,
    pub dvips: PathBuf,
    pub ps2pdf: PathBuf,
    pub pdf2ps: PathBuf,
}

#[cfg(unix)]
impl FakeToolchain {
    /// Install the scripts under `<root>/bin`
    pub fn install(root: &Path) -> Self {
        let bin_dir = root.join("bin");
        std::fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");
        let bin_dir = std::fs::canonicalize(&bin_dir).expect("Failed to canonicalize bin dir");
        let log = bin_dir.join("calls.log");

        let preamble = |tool: &str| {
            format!(
                "[ \"${FAKE_FAIL_ENV}\" = \"{tool}\" ] && exit 12\n\
                 echo \"{tool} $*\" >> \"{log}\"\n\
                 for last; do :; done",
                log = log.display()
            )
        };

        let pdflatex = write_script(
            &bin_dir,
            "pdflatex",
            &format!(
                "{}\nbase=\"${{last%.tex}}\"\n\
                 echo aux > \"$base.aux\"\necho log > \"$base.log\"\n\
                 printf '%%PDF-1.4\\n' > \"$base.pdf\"",
                preamble("pdflatex")
            ),
        );
        let latex = write_script(
            &bin_dir,
            "latex",
            &format!(
                "{}\nbase=\"${{last%.tex}}\"\n\
                 echo aux > \"$base.aux\"\necho log > \"$base.log\"\n\
                 echo dvi > \"$base.dvi\"",
                preamble("latex")
            ),
        );
        // dvips -o <out> <in>
        let dvips = write_script(
            &bin_dir,
            "dvips",
            &format!("{}\nprintf '%%!PS\\n' > \"$2\"", preamble("dvips")),
        );
        // ps2pdf <in> <out>
        let ps2pdf = write_script(
            &bin_dir,
            "ps2pdf",
            &format!("{}\nprintf '%%PDF-1.4\\n' > \"$last\"", preamble("ps2pdf")),
        );
        let pdf2ps = write_script(
            &bin_dir,
            "pdf2ps",
            &format!("{}\nprintf '%%!PS\\n' > \"$last\"", preamble("pdf2ps")),
        );

        Self {
            bin_dir,
            log,
            latex,
            pdflatex,
            dvips,
            ps2pdf,
            pdf2ps,
        }
    }

    /// `LATEXLAB_*` variables pointing every tool at its fake
    pub fn envs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("LATEXLAB_LATEX", self.latex.display().to_string()),
            ("LATEXLAB_PDFLATEX", self.pdflatex.display().to_string()),
            ("LATEXLAB_DVIPS", self.dvips.display().to_string()),
            ("LATEXLAB_PS2PDF", self.ps2pdf.display().to_string()),
            ("LATEXLAB_PDF2PS", self.pdf2ps.display().to_string()),
        ]
    }

    /// Logged calls, one `<tool> <args>` line each
    pub fn calls(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.log) {
            Ok(content) => content.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn count(&self, tool: &str) -> usize {
        let prefix = format!("{tool} ");
        self.calls()
            .iter()
            .filter(|line| line.starts_with(&prefix))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_in_workspace_creates_in_tmp() {
        let temp = temp_dir_in_workspace();
        let path = temp.path();

        assert!(
            path.to_string_lossy().contains(".tmp"),
            "Path should contain .tmp, got: {}",
            path.display()
        );
        assert!(path.is_dir(), "Path should be a directory");
    }

    #[test]
    fn test_temp_dir_auto_cleanup() {
        let path = {
            let temp = temp_dir_in_workspace();
            temp.path().to_path_buf()
        };

        assert!(
            !path.exists(),
            "Directory should not exist after drop: {}",
            path.display()
        );
    }

    #[test]
    fn test_list_files_is_sorted_and_skips_dirs() {
        let temp = temp_dir_in_workspace();
        touch_all(temp.path(), &["b.tex", "a.pdf"]);
        std::fs::create_dir(temp.path().join("sub.tex")).unwrap();

        assert_eq!(list_files(temp.path()), vec!["a.pdf", "b.tex"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_fake_pdflatex_writes_outputs_and_logs() {
        let temp = temp_dir_in_workspace();
        let tools = FakeToolchain::install(temp.path());
        touch_all(temp.path(), &["paper.tex"]);

        let status = std::process::Command::new(&tools.pdflatex)
            .arg("-interaction=nonstopmode")
            .arg("paper.tex")
            .current_dir(temp.path())
            .status()
            .unwrap();
        assert!(status.success());

        assert!(temp.path().join("paper.pdf").exists());
        assert!(temp.path().join("paper.aux").exists());
        assert_eq!(tools.count("pdflatex"), 1);
        assert_eq!(
            tools.calls(),
            vec!["pdflatex -interaction=nonstopmode paper.tex"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_fake_dvips_honours_output_flag() {
        let temp = temp_dir_in_workspace();
        let tools = FakeToolchain::install(temp.path());
        touch_all(temp.path(), &["paper.dvi"]);

        let status = std::process::Command::new(&tools.dvips)
            .args(["-o", "paper.ps", "paper.dvi"])
            .current_dir(temp.path())
            .status()
            .unwrap();
        assert!(status.success());
        assert!(temp.path().join("paper.ps").exists());
    }
}
