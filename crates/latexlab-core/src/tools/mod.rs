//! External tool invocation
//!
//! Every typesetter, converter, removal command and `git` call goes through a
//! [`ToolRunner`]. The process-backed [`ProcessRunner`] is used by the CLI;
//! tests substitute recording doubles.
//!
//! ```text
//! run_checked()
//!     ↓
//! 1. locate program (which, relative to the working directory)
//!     → missing: MISSING_TOOL
//!     ↓
//! 2. spawn with inherited stdio
//!     → spawn error: TOOL_SPAWN_FAILED
//!     ↓
//! 3. non-zero exit: TOOL_FAILED (code propagated)
//! ```

mod exec;

pub use exec::ProcessRunner;

use crate::error::{LatexlabError, Result};
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};

/// A configured tool: program plus the extra arguments written next to it
///
/// `"pdflatex -interaction=nonstopmode"` becomes program `pdflatex` with one
/// leading argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let mut words = value.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| LatexlabError::ConfigInvalidValue {
                field: field.to_string(),
                reason: "tool invocation must not be empty".to_string(),
            })?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One process to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(tool: &ToolCommand, cwd: &Path) -> Self {
        Self {
            program: tool.program.clone(),
            args: tool.args.clone(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Command line as shown to the user
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Exit status of a finished tool; `None` when terminated by a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn failure(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub status: ToolStatus,
    pub stdout: String,
}

pub trait ToolRunner {
    /// Resolve `program` to an executable, relative paths against `cwd`
    fn locate(&self, program: &str, cwd: &Path) -> Option<PathBuf>;

    /// Run with inherited stdout/stderr
    fn run(&self, invocation: &Invocation) -> Result<ToolStatus>;

    /// Run with stdout captured and stderr discarded
    fn capture(&self, invocation: &Invocation) -> Result<ToolOutput>;
}

/// Fail with `MISSING_TOOL` unless the program can be found
pub fn ensure_available(runner: &dyn ToolRunner, program: &str, cwd: &Path) -> Result<PathBuf> {
    runner
        .locate(program, cwd)
        .ok_or_else(|| LatexlabError::MissingTool {
            tool: program.to_string(),
        })
}

/// Locate, run, and turn a non-zero exit into `TOOL_FAILED`
pub fn run_checked(runner: &dyn ToolRunner, invocation: &Invocation) -> Result<()> {
    ensure_available(runner, &invocation.program, &invocation.cwd)?;
    debug!("running `{}` in {}", invocation.command_line(), invocation.cwd.display());

    let status = runner.run(invocation)?;
    if !status.is_success() {
        return Err(LatexlabError::ToolFailed {
            tool: invocation.program.clone(),
            code: status.code,
        });
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::FakeRunner;
    use super::*;

    #[test]
    fn test_tool_command_splits_extra_args() {
        let tool = ToolCommand::parse("pdflatex", "pdflatex  -interaction=nonstopmode -halt-on-error")
            .unwrap();
        assert_eq!(tool.program, "pdflatex");
        assert_eq!(tool.args, vec!["-interaction=nonstopmode", "-halt-on-error"]);
        assert_eq!(tool.to_string(), "pdflatex -interaction=nonstopmode -halt-on-error");
    }

    #[test]
    fn test_tool_command_rejects_blank() {
        let err = ToolCommand::parse("dvips", "   ").unwrap_err();
        assert!(matches!(err, LatexlabError::ConfigInvalidValue { .. }));
    }

    #[test]
    fn test_invocation_appends_file_args_after_tool_args() {
        let tool = ToolCommand::parse("dvips", "dvips -q").unwrap();
        let inv = Invocation::new(&tool, Path::new("/work"))
            .args(["-o", "paper.ps"])
            .arg("paper.dvi");
        assert_eq!(inv.command_line(), "dvips -q -o paper.ps paper.dvi");
    }

    #[test]
    fn test_run_checked_reports_missing_tool() {
        let runner = FakeRunner::new().missing("dvips");
        let inv = Invocation::new(&ToolCommand::parse("dvips", "dvips").unwrap(), Path::new("."));
        let err = run_checked(&runner, &inv).unwrap_err();
        assert!(matches!(err, LatexlabError::MissingTool { ref tool } if tool == "dvips"));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_run_checked_propagates_exit_code() {
        let runner = FakeRunner::new().failing("pdflatex", 3);
        let inv = Invocation::new(
            &ToolCommand::parse("pdflatex", "pdflatex").unwrap(),
            Path::new("."),
        );
        let err = run_checked(&runner, &inv).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
