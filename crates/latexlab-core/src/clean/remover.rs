use crate::config::RemoveCommand;
use crate::error::{LatexlabError, Result};
use crate::tools::{Invocation, ToolCommand, ToolRunner, ensure_available, run_checked};
use crate::workspace::Workspace;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Deletes one file at a time, as configured by `remove`
pub enum Remover<'r> {
    Builtin,
    Noop,
    External {
        tool: ToolCommand,
        runner: &'r dyn ToolRunner,
        cwd: PathBuf,
    },
}

impl<'r> Remover<'r> {
    pub fn from_workspace(ws: &Workspace<'r>) -> Result<Self> {
        Ok(match &ws.config.remove {
            RemoveCommand::Builtin => Remover::Builtin,
            RemoveCommand::Noop => Remover::Noop,
            RemoveCommand::External(command) => {
                let tool = ToolCommand::parse("remove", command)?;
                ensure_available(ws.runner, &tool.program, ws.dir())?;
                Remover::External {
                    tool,
                    runner: ws.runner,
                    cwd: ws.dir().to_path_buf(),
                }
            }
        })
    }

    /// Returns whether the file was actually removed
    pub fn remove(&self, path: &Path) -> Result<bool> {
        match self {
            Remover::Builtin => match std::fs::remove_file(path) {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
                Err(e) => Err(LatexlabError::IoError(e)),
            },
            Remover::Noop => Ok(false),
            Remover::External { tool, runner, cwd } => {
                let name = path
                    .strip_prefix(cwd)
                    .unwrap_or(path)
                    .display()
                    .to_string();
                run_checked(*runner, &Invocation::new(tool, cwd).arg(name))?;
                Ok(true)
            }
        }
    }
}
