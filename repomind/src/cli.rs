//! Command-line arguments. Every flag overrides the matching config key.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "repomind",
    version,
    about = "Understand any codebase in minutes, not days."
)]
pub struct Cli {
    /// Screen to open, e.g. `/chat?repo=octocat%2FHello-World`.
    #[arg(long, default_value = "/")]
    pub open: String,

    /// Seed for the reply and status-line picks.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Color theme: `repomind`, `dark` or `catppuccin-mocha`.
    #[arg(long)]
    pub theme: Option<String>,

    /// Config file to read instead of the XDG default.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file. Logging is off without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
