//! Sidebar data handed to the site generator.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// One titled group of pages in the sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    /// Display title.
    pub title: String,
    /// Whether the group can be collapsed.
    pub collapsable: bool,
    /// Page identifiers, in display order.
    pub children: Vec<String>,
}

/// Complete sidebar: the section index followed by each group.
///
/// Serializes as a single flat sequence, the shape the site generator reads:
///
/// ```json
/// ["/api/0.6.1/", {"title": "prefect", "collapsable": true, "children": ["triggers"]}]
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarStructure {
    /// Identifier of the section index.
    pub root: String,
    /// Groups in configured order.
    pub entries: Vec<SidebarEntry>,
}

impl SidebarStructure {
    /// Number of top-level items once serialized (root plus entries).
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.entries.len()
    }

    /// Look up an entry by title.
    #[must_use]
    pub fn entry(&self, title: &str) -> Option<&SidebarEntry> {
        self.entries.iter().find(|e| e.title == title)
    }
}

impl Serialize for SidebarStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        seq.serialize_element(&self.root)?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample() -> SidebarStructure {
        SidebarStructure {
            root: "/api/0.6.1/".to_owned(),
            entries: vec![
                SidebarEntry {
                    title: "prefect".to_owned(),
                    collapsable: true,
                    children: vec!["triggers".to_owned()],
                },
                SidebarEntry {
                    title: "prefect.client".to_owned(),
                    collapsable: false,
                    children: vec!["client/".to_owned(), "client/secrets".to_owned()],
                },
            ],
        }
    }

    #[test]
    fn test_serializes_as_flat_sequence() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(
            json,
            json!([
                "/api/0.6.1/",
                {"title": "prefect", "collapsable": true, "children": ["triggers"]},
                {
                    "title": "prefect.client",
                    "collapsable": false,
                    "children": ["client/", "client/secrets"]
                }
            ])
        );
    }

    #[test]
    fn test_len_counts_root() {
        let structure = sample();

        assert_eq!(structure.len(), 3);

        let empty = SidebarStructure {
            root: "/".to_owned(),
            entries: Vec::new(),
        };
        assert_eq!(empty.len(), 1);
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!(["/"]));
    }

    #[test]
    fn test_entry_lookup() {
        let structure = sample();

        assert_eq!(
            structure.entry("prefect").map(|e| e.children.clone()),
            Some(vec!["triggers".to_owned()])
        );
        assert!(structure.entry("prefect.tasks").is_none());
    }
}
