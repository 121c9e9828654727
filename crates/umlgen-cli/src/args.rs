//! Command-line argument definitions for the umlgen CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control configuration file selection, the output
//! directory, which diagrams are rendered, and logging verbosity.

use clap::Parser;

/// Render the Voice Automation Hub UML diagrams to PDF
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory to write diagrams to, overriding the configuration
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Never contact the remote rendering service
    #[arg(long)]
    pub offline: bool,

    /// Render only the named diagram (repeatable, see --list)
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,

    /// List the built-in diagrams and exit
    #[arg(long)]
    pub list: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
