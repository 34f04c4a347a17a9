mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use context::Context;
use latexlab_core::clean::CleanMode;
use latexlab_core::error::{EXIT_FAILURE, LatexlabError};
use latexlab_core::format::Format;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(e) = dispatch(&cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(exit_code(&e));
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    // doctor reports configuration problems instead of failing on them
    let ctx = Context::new(&cli.global);

    match cli.command {
        None => commands::build::run(&ctx?, None),
        Some(Commands::Ps) => commands::build::run(&ctx?, Some(Format::Ps)),
        Some(Commands::Pdf) => commands::build::run(&ctx?, Some(Format::Pdf)),
        Some(Commands::Clean) => commands::clean::run_transient(&ctx?),
        Some(Commands::CleanPs) => {
            commands::clean::run_format(&ctx?, Format::Ps, CleanMode::Conditional)
        }
        Some(Commands::CleanPdf) => {
            commands::clean::run_format(&ctx?, Format::Pdf, CleanMode::Conditional)
        }
        Some(Commands::Cleanup) => commands::clean::run_all(&ctx?, CleanMode::Conditional),
        Some(Commands::WipePs) => commands::clean::run_format(&ctx?, Format::Ps, CleanMode::Wipe),
        Some(Commands::WipePdf) => commands::clean::run_format(&ctx?, Format::Pdf, CleanMode::Wipe),
        Some(Commands::WipeAll) => commands::clean::run_all(&ctx?, CleanMode::Wipe),
        Some(Commands::Backup) => commands::snapshot::backup(&ctx?),
        Some(Commands::Restore) => commands::snapshot::restore(&ctx?),
        Some(Commands::History) => commands::snapshot::history(&ctx?),
        Some(Commands::Doctor { json }) => commands::doctor::run(&cli.global, ctx, json),
    }
}

/// Library errors carry their own exit code; anything else exits 1
fn exit_code(e: &anyhow::Error) -> i32 {
    e.downcast_ref::<LatexlabError>()
        .map(LatexlabError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
