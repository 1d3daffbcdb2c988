use std::path::PathBuf;

use clap::Parser;

/// Watches the clipboard for images, hosts them, and types their URL on demand.
#[derive(Debug, Parser)]
#[command(name = "smart-paste", version, about)]
pub struct Cli {
    /// Configuration file to use instead of the default search path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Probe the server's health endpoint and exit.
    #[arg(long)]
    pub check: bool,
}
