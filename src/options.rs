// ============================================================================
// options.rs — Command-line arguments (CLI)
// ============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack existing favicon-<size>.png files into an ICO, then delete them
    Pack {
        /// Input PNG files (default: favicon-16.png favicon-32.png favicon-48.png)
        #[arg(short, long = "input", value_name = "FILE", num_args = 1..)]
        inputs: Option<Vec<PathBuf>>,

        /// Pick up every file matching the configured glob pattern instead
        #[arg(long, conflicts_with = "inputs")]
        discover: bool,

        /// Output ICO path (default: favicon.ico)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep the input PNG files after a successful write
        #[arg(short, long)]
        keep: bool,
    },

    /// Resize one source logo into every icon size and write an ICO
    Resize {
        /// Source image (default: static/img/logo.png)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Comma separated side lengths, 1-256 (default: 16,32,48)
        #[arg(long, value_name = "LIST")]
        sizes: Option<String>,

        /// Output ICO path (default: static/img/favicon.ico)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the images stored in an ICO file
    Inspect {
        /// ICO file to read
        file: PathBuf,
    },

    /// Write a favicon.toml with the default settings
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "favforge")]
#[command(about = "favforge - Build a multi-resolution favicon.ico from PNG assets", long_about = None)]
pub struct CliOptions {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file path (used when present)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Verbose output (per-image details)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only errors and the final line
    #[arg(short, long, global = true)]
    pub quiet: bool,
}
