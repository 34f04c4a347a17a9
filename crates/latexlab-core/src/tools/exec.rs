use super::{Invocation, ToolOutput, ToolRunner, ToolStatus};
use crate::error::{LatexlabError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs tools as child processes of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).current_dir(&invocation.cwd);
        cmd
    }

    fn spawn_error(invocation: &Invocation, e: std::io::Error) -> LatexlabError {
        LatexlabError::ToolSpawnFailed {
            tool: invocation.program.clone(),
            reason: e.to_string(),
        }
    }
}

impl ToolRunner for ProcessRunner {
    fn locate(&self, program: &str, cwd: &Path) -> Option<PathBuf> {
        which::which_in(program, std::env::var_os("PATH"), cwd).ok()
    }

    fn run(&self, invocation: &Invocation) -> Result<ToolStatus> {
        let status = Self::command(invocation)
            .status()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        Ok(ToolStatus {
            code: status.code(),
        })
    }

    fn capture(&self, invocation: &Invocation) -> Result<ToolOutput> {
        let output = Self::command(invocation)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        Ok(ToolOutput {
            status: ToolStatus {
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
