use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "replaystat")]
#[command(about = "Batch statistics over board-game replay corpora", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the configured corpus roots and write metric reports
    Analyze {
        /// Configuration file (defaults to ./replaystat.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report directory (overrides the configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON run summary to this file
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Parse and filter files of a category in parallel
        #[arg(long)]
        parallel: bool,

        /// Worker threads for --parallel (0 = one per core)
        #[arg(long, default_value = "0")]
        jobs: usize,

        /// Increase log verbosity (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
    /// Create a default replaystat.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
