//! Global context for CLI commands

use crate::cli::GlobalArgs;
use anyhow::{Result, bail};
use latexlab_core::config::Config;
use latexlab_core::tools::ProcessRunner;
use latexlab_core::workspace::Workspace;
use log::debug;
use std::env;
use std::path::PathBuf;

/// Working directory plus its effective configuration
pub struct Context {
    pub dir: PathBuf,
    pub config: Config,
    pub verbose: bool,
}

impl Context {
    /// Resolve the working directory and layer the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The working directory does not exist
    /// - The config file cannot be read or parsed
    /// - An override holds an invalid value
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let dir = match &args.dir {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        if !dir.is_dir() {
            bail!("Working directory '{}' does not exist", dir.display());
        }

        let config = Config::load(&dir, args.config.as_deref(), &args.overrides())?;
        debug!("effective configuration: {:?}", config);

        Ok(Self {
            dir,
            config,
            verbose: args.verbose,
        })
    }

    pub fn workspace(&self) -> Workspace<'static> {
        Workspace::new(self.dir.clone(), self.config.clone(), &ProcessRunner)
    }
}
