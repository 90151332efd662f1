//! Mod Update-Checker CLI
//!
//! Injects an update-check notification into a Vermintide mod's scripts,
//! and removes it again before local development resumes.

mod cli;
mod commands;
mod error;
mod manifest;
mod workspace;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let cwd = std::env::current_dir()?;
    match cli.command {
        Commands::Enable { mod_name, force } => commands::run_enable(&cwd, &mod_name, force),
        Commands::Disable { mod_name } => commands::run_disable(&cwd, &mod_name),
    }
}
