use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codefetch")]
#[command(author, version, about = "Browse and fetch functions from a source tree")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .codefetch/config.toml
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// List files that survive the exclusion rules
    Files {
        /// Only list files under this path, relative to the root
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Print JSON instead of one path per line
        #[arg(long)]
        json: bool,
    },

    /// List function-like symbols in source files
    Symbols {
        /// Only list symbols of this file, relative to the root
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Print one symbol's source
    Show {
        /// File containing the symbol, relative to the root
        file: PathBuf,

        /// Symbol name
        name: String,

        /// Print the whole declaration instead of the first and last line
        #[arg(long)]
        full: bool,

        #[arg(long)]
        json: bool,
    },

    /// Start the MCP server on stdio
    Serve,
}
