//! Identifier normalization for discovered documentation files.
//!
//! Turns a path relative to the identifier base into the string the site
//! generator links to: extension removed, index files collapsed onto their
//! directory.

use std::path::{Component, Path};

use crate::IndexerSettings;

/// Convert a relative content-file path to a document identifier.
///
/// Returns `None` if the file does not carry one of the configured content
/// extensions.
///
/// Examples (default settings):
/// - `README.md` -> `""`
/// - `client.md` -> `"client"`
/// - `cache/README.md` -> `"cache/"`
/// - `cache/cache.md` -> `"cache/cache"`
///
/// The separator before a collapsed index name is kept, so `cache/README.md`
/// and `cache.md` never produce the same identifier.
pub fn normalize_identifier(rel_path: &Path, settings: &IndexerSettings) -> Option<String> {
    let ext = rel_path.extension()?.to_str()?;
    if !settings.extensions.iter().any(|e| e == ext) {
        return None;
    }

    let joined = join_components(rel_path);
    let without_ext = joined.strip_suffix(ext)?.strip_suffix('.')?;

    Some(collapse_index(without_ext, &settings.index_name).to_owned())
}

/// Join the normal components of a path with `/`, independent of host OS.
fn join_components(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}

/// Drop a trailing index segment, leaving the separator in front of it.
fn collapse_index<'a>(id: &'a str, index_name: &str) -> &'a str {
    match id.rsplit_once('/') {
        Some((_, last)) if last == index_name => &id[..id.len() - index_name.len()],
        None if id == index_name => "",
        _ => id,
    }
}
