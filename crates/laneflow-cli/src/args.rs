//! Command-line argument definitions for the Laneflow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the coordinate engine, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Laneflow layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input workflow file (TOML, or JSON with a `.json` extension)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output layout JSON file
    #[arg(short, long, default_value = "layout.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Coordinate engine overriding the configuration (basic, sugiyama)
    #[arg(long)]
    pub engine: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
