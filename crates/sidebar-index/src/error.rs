//! Indexing error types.

use std::path::PathBuf;

/// Error returned when a documentation tree cannot be indexed.
///
/// Every variant carries the path that failed so the build can report it.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The documentation root does not exist.
    #[error("Documentation root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A path expected to be a directory is something else.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Exclude pattern failed to compile.
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        /// Pattern as written in the settings.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::PatternError,
    },

    /// Reading a directory or its entries failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read when the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    /// Wrap an I/O error with the path it occurred at.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::RootNotFound(path) | Self::NotADirectory(path) | Self::Io { path, .. } => {
                Some(path)
            }
            Self::Pattern { .. } => None,
        }
    }
}
