//! Sidebar composition from configured sections.

use std::path::PathBuf;

use sidebar_config::{Config, DocsConfig, IdentifierMode, SectionConfig, SectionSource};
use sidebar_index::{
    DocumentRef, IdentifierBase, IndexError, IndexerSettings, PathIndexer, find_collisions,
};

use crate::structure::{SidebarEntry, SidebarStructure};

/// Error returned when the sidebar can't be assembled.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// The indexer could not be set up.
    #[error("{0}")]
    Indexer(#[from] IndexError),

    /// A section's directory could not be indexed.
    #[error("Failed to index section {section:?}: {source}")]
    Index {
        /// Section title.
        section: String,
        /// Underlying indexing error.
        #[source]
        source: IndexError,
    },

    /// Several files in a section normalize to the same identifier.
    #[error(
        "Identifier {identifier:?} in section {section:?} comes from several files: {}",
        display_paths(paths)
    )]
    Collision {
        /// Section title.
        section: String,
        /// Shared identifier.
        identifier: String,
        /// Source files producing it.
        paths: Vec<PathBuf>,
    },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build indexer settings from the docs configuration.
#[must_use]
pub fn indexer_settings_from_config(docs: &DocsConfig) -> IndexerSettings {
    IndexerSettings {
        extensions: docs.extensions.clone(),
        index_name: docs.index_name.clone(),
        exclude: docs.exclude.clone(),
        base: match docs.identifiers {
            IdentifierMode::Root => IdentifierBase::Root,
            IdentifierMode::Section => IdentifierBase::Section,
        },
    }
}

/// Composes the sidebar from a [`Config`].
///
/// Sections keep their configured order. Literal sections are copied
/// verbatim; directory sections are indexed on every call to
/// [`assemble`](Self::assemble).
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::path::Path;
/// use sidebar_config::Config;
/// use sidebar_site::SidebarAssembler;
///
/// let config = Config::builtin(Path::new("."));
/// let sidebar = SidebarAssembler::new(&config).assemble()?;
/// assert_eq!(sidebar.len(), 1 + config.sections.len());
/// # Ok(())
/// # }
/// ```
pub struct SidebarAssembler<'a> {
    config: &'a Config,
}

impl<'a> SidebarAssembler<'a> {
    /// Create an assembler for `config`.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Assemble a fresh sidebar.
    ///
    /// # Errors
    ///
    /// Returns [`AssembleError`] if a directory section can't be indexed, or
    /// if `docs.strict` is set and two files collapse to one identifier.
    pub fn assemble(&self) -> Result<SidebarStructure, AssembleError> {
        let docs = &self.config.docs;
        let indexer =
            PathIndexer::with_settings(&docs.root_dir, indexer_settings_from_config(docs))?;

        let entries = self
            .config
            .sections
            .iter()
            .map(|section| self.assemble_entry(&indexer, section))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            root = %docs.root_dir.display(),
            sections = entries.len(),
            "Assembled sidebar"
        );

        Ok(SidebarStructure {
            root: docs.root_identifier.clone(),
            entries,
        })
    }

    fn assemble_entry(
        &self,
        indexer: &PathIndexer,
        section: &SectionConfig,
    ) -> Result<SidebarEntry, AssembleError> {
        let children = match section.source() {
            SectionSource::Literal(children) => children.to_vec(),
            SectionSource::Directory(dir) => {
                let docs = indexer
                    .scan(dir)
                    .map_err(|source| AssembleError::Index {
                        section: section.title.clone(),
                        source,
                    })?;
                self.check_collisions(section, &docs)?;

                let mut children: Vec<String> = docs.into_iter().map(|d| d.identifier).collect();
                children.dedup();
                tracing::debug!(
                    section = %section.title,
                    dir,
                    children = children.len(),
                    "Indexed section"
                );
                children
            }
        };

        Ok(SidebarEntry {
            title: section.title.clone(),
            collapsable: section.collapsable,
            children,
        })
    }

    fn check_collisions(
        &self,
        section: &SectionConfig,
        docs: &[DocumentRef],
    ) -> Result<(), AssembleError> {
        for collision in find_collisions(docs) {
            if self.config.docs.strict {
                return Err(AssembleError::Collision {
                    section: section.title.clone(),
                    identifier: collision.identifier,
                    paths: collision.paths,
                });
            }
            tracing::warn!(
                section = %section.title,
                identifier = %collision.identifier,
                paths = %display_paths(&collision.paths),
                "Several files share one identifier, keeping it once"
            );
        }
        Ok(())
    }
}
