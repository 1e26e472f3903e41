//! Documentation file discovery for sidebar generation.
//!
//! This crate provides [`PathIndexer`], which walks one section directory of a
//! documentation root and returns the sorted identifiers the site generator
//! uses to link to each page:
//!
//! - Recursive discovery of content files (`.md` by default)
//! - Extension stripping and `/`-joined identifiers on every platform
//! - Index files (`README.md`) collapsed onto their directory
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//!
//! let ids = sidebar_index::list_documents(Path::new("docs/api/0.6.1"), "client")?;
//! for id in ids {
//!     println!("{id}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod scanner;
mod source;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;

pub use error::IndexError;
pub use source::normalize_identifier;

use scanner::Scanner;

/// Directory identifiers are computed relative to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdentifierBase {
    /// Relative to the documentation root (`client/secrets`).
    #[default]
    Root,
    /// Relative to the section directory (`secrets`).
    Section,
}

/// Settings controlling discovery and normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexerSettings {
    /// Content file extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Base name of index/overview files.
    pub index_name: String,
    /// Glob patterns, relative to the section directory, of files to skip.
    pub exclude: Vec<String>,
    /// Directory identifiers are relative to.
    pub base: IdentifierBase,
}

impl Default for IndexerSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_owned()],
            index_name: "README".to_owned(),
            exclude: Vec::new(),
            base: IdentifierBase::Root,
        }
    }
}

/// A discovered document: its identifier and the file it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRef {
    /// Normalized identifier (e.g., `"client/"`, `"client/secrets"`).
    pub identifier: String,
    /// Path to the source file.
    pub source_path: PathBuf,
}

/// Several source files that normalize to the same identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    /// Shared identifier.
    pub identifier: String,
    /// Source files, in discovery order.
    pub paths: Vec<PathBuf>,
}

/// Indexes sections of one documentation root.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use sidebar_index::{IdentifierBase, IndexerSettings, PathIndexer};
///
/// let settings = IndexerSettings {
///     base: IdentifierBase::Section,
///     ..IndexerSettings::default()
/// };
/// let indexer = PathIndexer::with_settings("docs/api/0.6.1", settings)?;
/// let ids = indexer.list_documents("engine")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PathIndexer {
    root: PathBuf,
    settings: IndexerSettings,
    exclude: Vec<Pattern>,
}

impl PathIndexer {
    /// Create an indexer with default settings.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            settings: IndexerSettings::default(),
            exclude: Vec::new(),
        }
    }

    /// Create an indexer with custom settings.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Pattern`] if an exclude pattern is not a valid glob.
    pub fn with_settings(
        root: impl Into<PathBuf>,
        settings: IndexerSettings,
    ) -> Result<Self, IndexError> {
        let exclude = settings
            .exclude
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| IndexError::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            root: root.into(),
            settings,
            exclude,
        })
    }

    /// Documentation root this indexer reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Settings in use.
    #[must_use]
    pub fn settings(&self) -> &IndexerSettings {
        &self.settings
    }

    /// List the sorted identifiers of every document under `section`.
    ///
    /// A missing section directory yields an empty list. One identifier is
    /// returned per content file, so identifiers shared by several files
    /// appear once per file (see [`find_collisions`]).
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the root is missing or not a directory, if
    /// the section path is not a directory, or if a directory can't be read.
    pub fn list_documents(&self, section: &str) -> Result<Vec<String>, IndexError> {
        Ok(self
            .scan(section)?
            .into_iter()
            .map(|doc| doc.identifier)
            .collect())
    }

    /// Discover every document under `section`, sorted by identifier.
    ///
    /// # Errors
    ///
    /// Same as [`list_documents`](Self::list_documents).
    pub fn scan(&self, section: &str) -> Result<Vec<DocumentRef>, IndexError> {
        self.check_root()?;

        let section_dir = self.root.join(section);
        match fs::metadata(&section_dir) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(IndexError::NotADirectory(section_dir)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(section, "Section directory missing, no documents");
                return Ok(Vec::new());
            }
            Err(e) => return Err(IndexError::io(section_dir, e)),
        }

        let base = match self.settings.base {
            IdentifierBase::Root => self.root.as_path(),
            IdentifierBase::Section => section_dir.as_path(),
        };

        let files = Scanner::new(&section_dir, &self.settings.extensions, &self.exclude).scan()?;
        let mut docs: Vec<DocumentRef> = files
            .into_iter()
            .filter_map(|source_path| {
                let rel = source_path.strip_prefix(base).ok()?;
                let identifier = normalize_identifier(rel, &self.settings)?;
                Some(DocumentRef {
                    identifier,
                    source_path,
                })
            })
            .collect();

        docs.sort_by(|a, b| {
            a.identifier
                .cmp(&b.identifier)
                .then_with(|| a.source_path.cmp(&b.source_path))
        });

        tracing::debug!(section, count = docs.len(), "Indexed section");
        Ok(docs)
    }

    fn check_root(&self) -> Result<(), IndexError> {
        match fs::metadata(&self.root) {
            Ok(metadata) if metadata.is_dir() => Ok(()),
            Ok(_) => Err(IndexError::NotADirectory(self.root.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(IndexError::RootNotFound(self.root.clone()))
            }
            Err(e) => Err(IndexError::io(&self.root, e)),
        }
    }
}

/// List the sorted document identifiers under `root/section` with default
/// settings.
///
/// # Errors
///
/// See [`PathIndexer::list_documents`].
pub fn list_documents(root: &Path, section: &str) -> Result<Vec<String>, IndexError> {
    PathIndexer::new(root).list_documents(section)
}

/// Find identifiers produced by more than one source file.
///
/// Collisions are returned sorted by identifier.
pub fn find_collisions(docs: &[DocumentRef]) -> Vec<Collision> {
    let mut by_id: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
    for doc in docs {
        by_id
            .entry(doc.identifier.as_str())
            .or_default()
            .push(doc.source_path.clone());
    }

    by_id
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(identifier, paths)| Collision {
            identifier: identifier.to_owned(),
            paths,
        })
        .collect()
}
