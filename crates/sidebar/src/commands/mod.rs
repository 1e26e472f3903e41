//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod list;

use std::path::PathBuf;

use clap::Args;

pub(crate) use build::BuildArgs;
pub(crate) use list::ListArgs;

/// Options shared by every command for locating the documentation.
#[derive(Args, Debug)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover sidebar.toml).
    #[arg(short, long, env = "SIDEBAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Documentation root directory (overrides config).
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}
