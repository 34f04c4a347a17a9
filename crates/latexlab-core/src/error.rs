use std::path::PathBuf;
use thiserror::Error;

/// Exit status for usage-level failures (no source, ambiguity, bad config, missing tool)
pub const EXIT_USAGE: i32 = 2;

/// Exit status for everything that has no more specific code
pub const EXIT_FAILURE: i32 = 1;

#[derive(Error, Debug)]
pub enum LatexlabError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    #[error("CONFIG_NOT_FOUND: config file '{}' does not exist", path.display())]
    ConfigNotFound { path: PathBuf },

    // Source errors
    #[error("SOURCE_NOT_FOUND: {0}")]
    SourceNotFound(String),

    #[error(
        "AMBIGUOUS_SOURCE: several .tex files found ({}); pick one with --source or LATEXLAB_SOURCE",
        candidates.join(", ")
    )]
    AmbiguousSource { candidates: Vec<String> },

    // Tool errors
    #[error("MISSING_TOOL: '{tool}' not found in PATH")]
    MissingTool { tool: String },

    #[error("TOOL_SPAWN_FAILED: could not start '{tool}': {reason}")]
    ToolSpawnFailed { tool: String, reason: String },

    #[error("TOOL_FAILED: '{tool}' exited with {}", describe_code(*code))]
    ToolFailed { tool: String, code: Option<i32> },

    // Snapshot errors
    #[error("NO_SNAPSHOTS: no backup repository at '{}'; run `latexlab backup` first", dir.display())]
    NoSnapshots { dir: PathBuf },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}

impl LatexlabError {
    /// Process exit status for this error
    ///
    /// A failed tool propagates its own non-zero status; a tool killed by a
    /// signal maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            LatexlabError::ConfigParseError(_)
            | LatexlabError::ConfigInvalidValue { .. }
            | LatexlabError::ConfigNotFound { .. }
            | LatexlabError::SourceNotFound(_)
            | LatexlabError::AmbiguousSource { .. }
            | LatexlabError::MissingTool { .. } => EXIT_USAGE,
            LatexlabError::ToolFailed { code, .. } => match code {
                Some(code) if *code != 0 => *code,
                _ => EXIT_FAILURE,
            },
            LatexlabError::ToolSpawnFailed { .. }
            | LatexlabError::NoSnapshots { .. }
            | LatexlabError::IoError(_) => EXIT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, LatexlabError>;
