//! CLI error types.

use sidebar_config::ConfigError;
use sidebar_index::IndexError;
use sidebar_site::{AssembleError, ExportError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Index(#[from] IndexError),

    #[error("{0}")]
    Assemble(#[from] AssembleError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
