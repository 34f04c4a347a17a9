//! Snapshot/restore of the working directory through `git`
//!
//! The repository metadata lives in a separate directory (`.latexlab-backup`
//! by default) so an existing `.git` in the same directory is never touched.

use crate::error::{LatexlabError, Result};
use crate::tools::{Invocation, ToolCommand, ToolOutput, ensure_available, run_checked};
use crate::workspace::Workspace;
use chrono::{Local, SecondsFormat};
use log::{debug, info};
use std::path::PathBuf;

const FALLBACK_NAME: &str = "latexlab";
const FALLBACK_EMAIL: &str = "latexlab@localhost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotOutcome {
    /// The backup repository was created by this call
    pub initialized: bool,
    pub message: String,
}

/// The git invocation shared by every backup command
struct BackupRepo<'w, 'r> {
    ws: &'w Workspace<'r>,
    git: ToolCommand,
    git_dir: PathBuf,
}

impl<'w, 'r> BackupRepo<'w, 'r> {
    fn open(ws: &'w Workspace<'r>) -> Result<Self> {
        let git = ws.git()?;
        ensure_available(ws.runner, &git.program, ws.dir())?;
        Ok(Self {
            ws,
            git,
            git_dir: ws.backup_dir(),
        })
    }

    fn exists(&self) -> bool {
        self.git_dir.join("HEAD").is_file()
    }

    fn require_existing(&self) -> Result<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(LatexlabError::NoSnapshots {
                dir: self.git_dir.clone(),
            })
        }
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(&self.git, self.ws.dir()).args([
            format!("--git-dir={}", self.git_dir.display()),
            format!("--work-tree={}", self.ws.dir().display()),
        ])
    }

    fn capture(&self, invocation: &Invocation) -> Result<ToolOutput> {
        debug!("capturing `{}`", invocation.command_line());
        self.ws.runner.capture(invocation)
    }

    fn capture_checked(&self, invocation: &Invocation) -> Result<String> {
        let output = self.capture(invocation)?;
        if !output.status.is_success() {
            return Err(LatexlabError::ToolFailed {
                tool: invocation.program.clone(),
                code: output.status.code,
            });
        }
        Ok(output.stdout)
    }

    /// Keep the metadata directory out of the snapshot when it sits inside
    /// the work tree
    fn write_exclude(&self) -> Result<()> {
        let Ok(relative) = self.git_dir.strip_prefix(self.ws.dir()) else {
            return Ok(());
        };
        let info_dir = self.git_dir.join("info");
        std::fs::create_dir_all(&info_dir)?;
        std::fs::write(
            info_dir.join("exclude"),
            format!("/{}/\n", relative.display()),
        )?;
        Ok(())
    }

    fn has_identity(&self) -> Result<bool> {
        let output = self.capture(&self.invocation().args(["config", "--get", "user.email"]))?;
        Ok(output.status.is_success() && !output.stdout.trim().is_empty())
    }
}

/// Stage everything and commit a timestamped snapshot
pub fn snapshot(ws: &Workspace<'_>) -> Result<SnapshotOutcome> {
    let repo = BackupRepo::open(ws)?;

    let initialized = !repo.exists();
    if initialized {
        info!("creating backup repository at {}", repo.git_dir.display());
        run_checked(ws.runner, &repo.invocation().args(["init", "--quiet"]))?;
    }
    repo.write_exclude()?;

    run_checked(ws.runner, &repo.invocation().args(["add", "-A"]))?;

    let message = format!(
        "snapshot {}",
        Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
    );
    let mut commit = repo.invocation();
    if !repo.has_identity()? {
        commit = commit.args([
            "-c".to_string(),
            format!("user.name={}", FALLBACK_NAME),
            "-c".to_string(),
            format!("user.email={}", FALLBACK_EMAIL),
        ]);
    }
    commit = commit.args(["commit", "--quiet", "--allow-empty", "-m"]).arg(message.clone());
    run_checked(ws.runner, &commit)?;

    Ok(SnapshotOutcome {
        initialized,
        message,
    })
}

/// Bring back files deleted since the last snapshot; returns their names
pub fn restore(ws: &Workspace<'_>) -> Result<Vec<String>> {
    let repo = BackupRepo::open(ws)?;
    repo.require_existing()?;

    // NUL-separated so names come back unquoted
    let deleted: Vec<String> = repo
        .capture_checked(&repo.invocation().args(["ls-files", "-z", "--deleted"]))?
        .split('\0')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if deleted.is_empty() {
        info!("nothing to restore");
        return Ok(deleted);
    }

    run_checked(
        ws.runner,
        &repo
            .invocation()
            .args(["checkout", "HEAD", "--"])
            .args(deleted.iter().cloned()),
    )?;
    Ok(deleted)
}

/// One line per snapshot, newest first
pub fn history(ws: &Workspace<'_>) -> Result<Vec<String>> {
    let repo = BackupRepo::open(ws)?;
    repo.require_existing()?;

    let log = repo.capture_checked(&repo.invocation().args(["log", "--oneline"]))?;
    Ok(log.lines().map(str::to_string).collect())
}

/// Whether a backup repository exists for this workspace
pub fn has_backup(ws: &Workspace<'_>) -> bool {
    ws.backup_dir().join("HEAD").is_file()
}
