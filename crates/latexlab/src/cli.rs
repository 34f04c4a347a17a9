//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use latexlab_core::config::Overrides;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "latexlab")]
#[command(version, about = "Build LaTeX documents to PostScript or PDF", long_about = None)]
pub struct Cli {
    /// Without a command the primary format is built
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args)]
pub struct GlobalArgs {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Working directory (defaults to the current directory)
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file (defaults to ./latexlab.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build PDF first (yes) or PostScript first (no)
    #[arg(long, env = "LATEXLAB_USE_PDF", global = true, value_name = "BOOL")]
    pub use_pdf: Option<String>,

    /// Source document(s) to build instead of auto-detecting
    #[arg(long, env = "LATEXLAB_SOURCE", global = true, value_name = "NAMES")]
    pub source: Option<String>,

    /// DVI-producing typesetter
    #[arg(long, env = "LATEXLAB_LATEX", global = true, value_name = "CMD")]
    pub latex: Option<String>,

    /// PDF-producing typesetter
    #[arg(long, env = "LATEXLAB_PDFLATEX", global = true, value_name = "CMD")]
    pub pdflatex: Option<String>,

    /// DVI to PostScript converter
    #[arg(long, env = "LATEXLAB_DVIPS", global = true, value_name = "CMD")]
    pub dvips: Option<String>,

    /// PostScript to PDF converter
    #[arg(long, env = "LATEXLAB_PS2PDF", global = true, value_name = "CMD")]
    pub ps2pdf: Option<String>,

    /// PDF to PostScript converter
    #[arg(long, env = "LATEXLAB_PDF2PS", global = true, value_name = "CMD")]
    pub pdf2ps: Option<String>,

    /// Version-control binary used for backups
    #[arg(long, env = "LATEXLAB_GIT", global = true, value_name = "CMD")]
    pub git: Option<String>,

    /// File removal: builtin, none, or a command such as "rm -f"
    #[arg(long = "rm", env = "LATEXLAB_RM", global = true, value_name = "CMD")]
    pub remove: Option<String>,
}

impl GlobalArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            use_pdf: self.use_pdf.clone(),
            source: self.source.clone(),
            latex: self.latex.clone(),
            pdflatex: self.pdflatex.clone(),
            dvips: self.dvips.clone(),
            ps2pdf: self.ps2pdf.clone(),
            pdf2ps: self.pdf2ps.clone(),
            git: self.git.clone(),
            remove: self.remove.clone(),
        }
    }
}

#[derive(Subcommand, Clone, Copy)]
pub enum Commands {
    /// Build PostScript output
    Ps,

    /// Build PDF output
    Pdf,

    /// Remove transient build files (aux, log, toc, ...)
    Clean,

    /// Remove .ps files whose source exists, cascading through the primary format
    CleanPs,

    /// Remove .pdf files whose source exists, cascading through the primary format
    CleanPdf,

    /// Remove transient files and both output formats where a source exists
    #[command(visible_alias = "clean-all")]
    Cleanup,

    /// Remove every .ps file, with or without source
    WipePs,

    /// Remove every .pdf file, with or without source
    WipePdf,

    /// Remove every output file of both formats
    WipeAll,

    /// Snapshot the working directory
    Backup,

    /// Restore files deleted since the last snapshot
    Restore,

    /// List snapshots
    History,

    /// Check that the configured tools are available
    Doctor {
        #[arg(long)]
        json: bool,
    },
}
