use colored::Colorize;
use std::io::{self, Write};

pub fn print_json(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}

/// `→ message`
pub fn step(msg: &str) {
    println!("{} {}", "→".cyan(), msg);
}

/// `✓ message`
pub fn done(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// `- message`, for files left untouched
pub fn skipped(msg: &str) {
    println!("{} {}", "-".yellow(), msg);
}

/// `✗ message` on stderr
pub fn failed(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}
