//! Content file discovery by filesystem walking.
//!
//! The walk only finds files; turning them into identifiers is left to
//! [`normalize_identifier`](crate::normalize_identifier).

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::IndexError;

/// Options used when matching exclude patterns.
const EXCLUDE_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Recursively collects content files below a section directory.
pub(crate) struct Scanner<'a> {
    section_dir: &'a Path,
    extensions: &'a [String],
    exclude: &'a [Pattern],
}

impl<'a> Scanner<'a> {
    /// Create a scanner rooted at `section_dir`.
    pub fn new(section_dir: &'a Path, extensions: &'a [String], exclude: &'a [Pattern]) -> Self {
        Self {
            section_dir,
            extensions,
            exclude,
        }
    }

    /// Walk the section directory and return every content file found.
    ///
    /// Hidden entries are skipped and symlinks are followed. A symlink back
    /// to a directory already being walked is not descended into. Order is
    /// unspecified.
    pub fn scan(&self) -> Result<Vec<PathBuf>, IndexError> {
        let mut files = Vec::new();
        let mut ancestors = HashSet::new();
        self.scan_directory(self.section_dir, &mut ancestors, &mut files)?;
        Ok(files)
    }

    /// `ancestors` holds the canonical paths of the directories on the
    /// current walk path.
    fn scan_directory(
        &self,
        dir: &Path,
        ancestors: &mut HashSet<PathBuf>,
        files: &mut Vec<PathBuf>,
    ) -> Result<(), IndexError> {
        let canonical = fs::canonicalize(dir).map_err(|e| IndexError::io(dir, e))?;
        if ancestors.contains(&canonical) {
            tracing::debug!(path = %dir.display(), "Skipping directory link cycle");
            return Ok(());
        }
        let entries = fs::read_dir(dir).map_err(|e| IndexError::io(dir, e))?;
        ancestors.insert(canonical.clone());

        for entry in entries {
            let entry = entry.map_err(|e| IndexError::io(dir, e))?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                // Dangling symlink
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "Skipping dangling link");
                    continue;
                }
                Err(e) => return Err(IndexError::io(path, e)),
            };

            if metadata.is_dir() {
                self.scan_directory(&path, ancestors, files)?;
            } else if self.is_content_file(&path) && !self.is_excluded(&path) {
                files.push(path);
            }
        }

        ancestors.remove(&canonical);
        Ok(())
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Ok(rel) = path.strip_prefix(self.section_dir) else {
            return false;
        };
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path_with(rel, EXCLUDE_MATCH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md() -> Vec<String> {
        vec!["md".to_owned()]
    }

    fn relative(files: &[PathBuf], base: &Path) -> Vec<String> {
        let mut rel: Vec<String> = files
            .iter()
            .map(|f| f.strip_prefix(base).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        rel.sort();
        rel
    }

    #[test]
    fn test_scan_finds_nested_md_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("top.md"), "# Top").unwrap();
        fs::write(nested.join("deep.md"), "# Deep").unwrap();

        let exts = md();
        let files = Scanner::new(temp_dir.path(), &exts, &[]).scan().unwrap();

        assert_eq!(relative(&files, temp_dir.path()), vec!["a/b/deep.md", "top.md"]);
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp_dir = tempfile::tempdir().unwrap();
        let hidden_dir = temp_dir.path().join(".vuepress");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("config.md"), "").unwrap();
        fs::write(temp_dir.path().join(".draft.md"), "").unwrap();
        fs::write(temp_dir.path().join("visible.md"), "").unwrap();

        let exts = md();
        let files = Scanner::new(temp_dir.path(), &exts, &[]).scan().unwrap();

        assert_eq!(relative(&files, temp_dir.path()), vec!["visible.md"]);
    }

    #[test]
    fn test_scan_ignores_other_extensions() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("page.md"), "").unwrap();
        fs::write(temp_dir.path().join("diagram.png"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let exts = md();
        let files = Scanner::new(temp_dir.path(), &exts, &[]).scan().unwrap();

        assert_eq!(relative(&files, temp_dir.path()), vec!["page.md"]);
    }

    #[test]
    fn test_scan_applies_exclude_patterns() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("tasks");
        fs::create_dir(&nested).unwrap();
        fs::write(temp_dir.path().join("_partial.md"), "").unwrap();
        fs::write(nested.join("_partial.md"), "").unwrap();
        fs::write(nested.join("shell.md"), "").unwrap();

        let exts = md();
        let exclude = vec![
            Pattern::new("_*.md").unwrap(),
            Pattern::new("*/_*.md").unwrap(),
        ];
        let files = Scanner::new(temp_dir.path(), &exts, &exclude)
            .scan()
            .unwrap();

        assert_eq!(relative(&files, temp_dir.path()), vec!["tasks/shell.md"]);
    }

    #[test]
    fn test_exclude_star_does_not_cross_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("tasks");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("_partial.md"), "").unwrap();

        let exts = md();
        let exclude = vec![Pattern::new("_*.md").unwrap()];
        let files = Scanner::new(temp_dir.path(), &exts, &exclude)
            .scan()
            .unwrap();

        assert_eq!(relative(&files, temp_dir.path()), vec!["tasks/_partial.md"]);
    }

    #[test]
    fn test_scan_unreadable_dir_is_error() {
        let missing = PathBuf::from("/nonexistent/sidebar-index/section");
        let exts = md();

        let err = Scanner::new(&missing, &exts, &[]).scan().unwrap_err();

        assert!(matches!(err, IndexError::Io { ref path, .. } if path == &missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_directory_symlinks() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("shared");
        let section = temp_dir.path().join("section");
        fs::create_dir(&target).unwrap();
        fs::create_dir(&section).unwrap();
        fs::write(target.join("linked.md"), "").unwrap();
        std::os::unix::fs::symlink(&target, section.join("shared")).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), section.join("dangling.md"))
            .unwrap();

        let exts = md();
        let files = Scanner::new(&section, &exts, &[]).scan().unwrap();

        assert_eq!(relative(&files, &section), vec!["shared/linked.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_stops_at_directory_link_cycle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let section = temp_dir.path().join("client");
        let nested = section.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(section.join("client.md"), "").unwrap();
        fs::write(nested.join("secrets.md"), "").unwrap();
        std::os::unix::fs::symlink(&section, section.join("loop")).unwrap();
        std::os::unix::fs::symlink(&section, nested.join("up")).unwrap();

        let exts = md();
        let files = Scanner::new(&section, &exts, &[]).scan().unwrap();

        assert_eq!(
            relative(&files, &section),
            vec!["client.md", "nested/secrets.md"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_lists_directory_linked_twice() {
        let temp_dir = tempfile::tempdir().unwrap();
        let section = temp_dir.path().join("section");
        let shared = section.join("shared");
        fs::create_dir_all(&shared).unwrap();
        fs::write(shared.join("page.md"), "").unwrap();
        std::os::unix::fs::symlink(&shared, section.join("alias")).unwrap();

        let exts = md();
        let files = Scanner::new(&section, &exts, &[]).scan().unwrap();

        assert_eq!(
            relative(&files, &section),
            vec!["alias/page.md", "shared/page.md"]
        );
    }
}
