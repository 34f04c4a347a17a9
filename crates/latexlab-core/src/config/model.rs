use crate::error::{LatexlabError, Result};
use crate::format::FormatRoles;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "latexlab.toml";

/// Default metadata directory for the backup repository
pub const DEFAULT_BACKUP_DIR: &str = ".latexlab-backup";

/// Effective configuration after defaults, file, environment and flags are layered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// PDF-first pipeline when true, PostScript-first otherwise
    pub use_pdf: bool,
    /// Explicit source name(s), whitespace separated
    pub source: Option<String>,
    pub tools: ToolsConfig,
    pub remove: RemoveCommand,
    pub backup: BackupConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_pdf: true,
            source: None,
            tools: ToolsConfig::default(),
            remove: RemoveCommand::Builtin,
            backup: BackupConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_latex")]
    pub latex: String,
    #[serde(default = "default_pdflatex")]
    pub pdflatex: String,
    #[serde(default = "default_dvips")]
    pub dvips: String,
    #[serde(default = "default_ps2pdf")]
    pub ps2pdf: String,
    #[serde(default = "default_pdf2ps")]
    pub pdf2ps: String,
    #[serde(default = "default_git")]
    pub git: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            latex: default_latex(),
            pdflatex: default_pdflatex(),
            dvips: default_dvips(),
            ps2pdf: default_ps2pdf(),
            pdf2ps: default_pdf2ps(),
            git: default_git(),
        }
    }
}

fn default_latex() -> String {
    "latex".to_string()
}

fn default_pdflatex() -> String {
    "pdflatex".to_string()
}

fn default_dvips() -> String {
    "dvips".to_string()
}

fn default_ps2pdf() -> String {
    "ps2pdf".to_string()
}

fn default_pdf2ps() -> String {
    "pdf2ps".to_string()
}

fn default_git() -> String {
    "git".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupConfig {
    #[serde(default = "default_backup_dir")]
    pub dir: PathBuf,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            dir: default_backup_dir(),
        }
    }
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BACKUP_DIR)
}

/// How output files are deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveCommand {
    /// `std::fs::remove_file`
    Builtin,
    /// Report only, delete nothing
    Noop,
    /// External command, the file name is appended as last argument
    External(String),
}

impl RemoveCommand {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "builtin" => RemoveCommand::Builtin,
            "none" | "true" | ":" => RemoveCommand::Noop,
            other => RemoveCommand::External(other.to_string()),
        }
    }
}

/// Boolean in the config file, either a TOML bool or a bool-like string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Text(String),
}

/// latexlab.toml schema
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    use_pdf: Option<BoolLike>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    remove: Option<String>,
    #[serde(default)]
    tools: Option<ToolsConfig>,
    #[serde(default)]
    backup: Option<BackupConfig>,
}

/// Values coming from environment variables or command-line flags
///
/// Every field is optional; a `Some` replaces whatever the file or the
/// defaults provided.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub use_pdf: Option<String>,
    pub source: Option<String>,
    pub latex: Option<String>,
    pub pdflatex: Option<String>,
    pub dvips: Option<String>,
    pub ps2pdf: Option<String>,
    pub pdf2ps: Option<String>,
    pub git: Option<String>,
    pub remove: Option<String>,
}

/// Parse `1/0`, `true/false`, `yes/no`, `on/off` (case insensitive)
pub fn parse_bool_like(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LatexlabError::ConfigInvalidValue {
            field: field.to_string(),
            reason: format!("'{}' is not a boolean (expected yes/no, true/false, 1/0, on/off)", other),
        }),
    }
}

impl Config {
    /// Load configuration for a working directory
    ///
    /// With `explicit_path` the file must exist. Without it, `latexlab.toml`
    /// in `dir` is read when present.
    pub fn load(dir: &Path, explicit_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    dir.join(path)
                };
                if !path.is_file() {
                    return Err(LatexlabError::ConfigNotFound { path });
                }
                Self::from_file(&path)?
            }
            None => {
                let path = dir.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply(overrides)?;
        Ok(config)
    }

    /// Read latexlab.toml on top of the defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LatexlabError::ConfigParseError(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| LatexlabError::ConfigParseError(e.to_string()))?;

        let mut config = Self::default();
        if let Some(use_pdf) = file.use_pdf {
            config.use_pdf = match use_pdf {
                BoolLike::Bool(b) => b,
                BoolLike::Text(s) => parse_bool_like("use_pdf", &s)?,
            };
        }
        config.source = non_blank(file.source);
        if let Some(remove) = file.remove {
            config.remove = RemoveCommand::parse(&remove);
        }
        if let Some(tools) = file.tools {
            config.tools = tools;
        }
        if let Some(backup) = file.backup {
            config.backup = backup;
        }
        Ok(config)
    }

    /// Apply environment/flag overrides
    pub fn apply(&mut self, overrides: &Overrides) -> Result<()> {
        if let Some(value) = &overrides.use_pdf {
            self.use_pdf = parse_bool_like("use_pdf", value)?;
        }
        if let Some(source) = non_blank(overrides.source.clone()) {
            self.source = Some(source);
        }
        let tools = [
            (&overrides.latex, &mut self.tools.latex),
            (&overrides.pdflatex, &mut self.tools.pdflatex),
            (&overrides.dvips, &mut self.tools.dvips),
            (&overrides.ps2pdf, &mut self.tools.ps2pdf),
            (&overrides.pdf2ps, &mut self.tools.pdf2ps),
            (&overrides.git, &mut self.tools.git),
        ];
        for (value, slot) in tools {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(LatexlabError::ConfigInvalidValue {
                        field: "tools".to_string(),
                        reason: "tool invocation must not be empty".to_string(),
                    });
                }
                *slot = value.clone();
            }
        }
        if let Some(remove) = &overrides.remove {
            self.remove = RemoveCommand::parse(remove);
        }
        Ok(())
    }

    pub fn roles(&self) -> FormatRoles {
        FormatRoles::new(self.use_pdf)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
