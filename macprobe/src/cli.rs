// macprobe/src/cli.rs
//! Defines the command-line argument structure using clap.
use clap::{ArgAction, Parser, Subcommand};
use macprobe_common::config::Config;
use macprobe_common::error::Result;

// Module declarations
pub mod adobe;

use crate::cli::adobe::Adobe;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "macprobe", bin_name = "macprobe")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Locate and identify installed Adobe Creative Cloud applications
    Adobe(Adobe),
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Adobe(command) => command.run(config),
        }
    }
}
