//! Command-line argument definitions for the errorsmith CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the catalog to check, where the report
//! goes, the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the errorsmith catalog checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the error catalog (TOML)
    #[arg(help = "Path to the error catalog")]
    pub catalog: String,

    /// Path to write the report to; printed to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
