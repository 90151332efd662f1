//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// Mod Update-Checker - notify players when a newer version of a mod is on Steam
#[derive(Parser, Debug)]
#[command(name = "muc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add the update-checker block to a mod's scripts
    ///
    /// Examples:
    ///   muc enable MyMod           # Inject into mods/MyMod
    ///   muc enable MyMod --force   # Replace an existing generated block
    Enable {
        /// Name of the mod under mods/
        mod_name: String,

        /// Replace an existing generated block instead of failing
        #[arg(short, long)]
        force: bool,
    },

    /// Remove the update-checker block from a mod's scripts
    Disable {
        /// Name of the mod under mods/
        mod_name: String,
    },
}
