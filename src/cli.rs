//! CLI definitions for tasklist.
//!
//! A single options struct parsed with clap's derive macros; the binary has
//! no subcommands.

use clap::Parser;

/// Task list web server backed by a flat JSON file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the task data file (overrides config)
    #[arg(short, long)]
    pub data: Option<String>,

    /// Path to the static assets directory (overrides config)
    #[arg(long)]
    pub static_dir: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    pub log: String,
}
