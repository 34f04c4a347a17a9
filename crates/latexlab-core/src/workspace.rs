use crate::config::Config;
use crate::error::Result;
use crate::format::FormatRoles;
use crate::tools::{ToolCommand, ToolRunner};
use std::path::{Path, PathBuf};

/// A working directory together with its configuration and the runner used
/// for external tools
pub struct Workspace<'r> {
    pub dir: PathBuf,
    pub config: Config,
    pub runner: &'r dyn ToolRunner,
}

impl<'r> Workspace<'r> {
    pub fn new(dir: impl Into<PathBuf>, config: Config, runner: &'r dyn ToolRunner) -> Self {
        Self {
            dir: dir.into(),
            config,
            runner,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn roles(&self) -> FormatRoles {
        self.config.roles()
    }

    pub fn latex(&self) -> Result<ToolCommand> {
        ToolCommand::parse("tools.latex", &self.config.tools.latex)
    }

    pub fn pdflatex(&self) -> Result<ToolCommand> {
        ToolCommand::parse("tools.pdflatex", &self.config.tools.pdflatex)
    }

    pub fn dvips(&self) -> Result<ToolCommand> {
        ToolCommand::parse("tools.dvips", &self.config.tools.dvips)
    }

    pub fn ps2pdf(&self) -> Result<ToolCommand> {
        ToolCommand::parse("tools.ps2pdf", &self.config.tools.ps2pdf)
    }

    pub fn pdf2ps(&self) -> Result<ToolCommand> {
        ToolCommand::parse("tools.pdf2ps", &self.config.tools.pdf2ps)
    }

    pub fn git(&self) -> Result<ToolCommand> {
        ToolCommand::parse("tools.git", &self.config.tools.git)
    }

    /// Backup metadata directory, resolved against the working directory
    pub fn backup_dir(&self) -> PathBuf {
        if self.config.backup.dir.is_absolute() {
            self.config.backup.dir.clone()
        } else {
            self.dir.join(&self.config.backup.dir)
        }
    }
}
