//! Configuration: built-in defaults, `latexlab.toml`, then environment and flags

mod model;

pub use model::{
    BackupConfig, CONFIG_FILE_NAME, Config, DEFAULT_BACKUP_DIR, Overrides, RemoveCommand,
    ToolsConfig, parse_bool_like,
};
