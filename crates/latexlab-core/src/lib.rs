//! Build orchestration for LaTeX documents.
//!
//! `latexlab-core` resolves which `.tex` source to act on, drives the external
//! typesetting and conversion tools in order, cleans build byproducts, and
//! snapshots the working directory through `git`.
//!
//! # Example
//!
//! ```no_run
//! use latexlab_core::config::{Config, Overrides};
//! use latexlab_core::format::Format;
//! use latexlab_core::pipeline::build_format;
//! use latexlab_core::tools::ProcessRunner;
//! use latexlab_core::workspace::Workspace;
//! use std::path::Path;
//!
//! # fn main() -> latexlab_core::Result<()> {
//! let dir = Path::new(".");
//! let config = Config::load(dir, None, &Overrides::default())?;
//! let ws = Workspace::new(dir, config, &ProcessRunner);
//!
//! for report in build_format(&ws, Format::Pdf)? {
//!     println!("{}", report.outcome.output().display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod clean;
pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod snapshot;
pub mod source;
pub mod tools;
pub mod workspace;

// Re-export commonly used types
pub use error::{LatexlabError, Result};
