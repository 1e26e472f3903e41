//! Rendering the sidebar in the form the site generator loads.

use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use sidebar_config::{ExportConfig, ExportFormat};

use crate::structure::SidebarStructure;

/// Error returned when the sidebar can't be exported.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// `{name: structure}`, serialized without an intermediate value so entry
/// keys keep their declared order.
struct NamedExport<'a> {
    name: &'a str,
    structure: &'a SidebarStructure,
}

impl Serialize for NamedExport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name, self.structure)?;
        map.end()
    }
}

/// Render the sidebar under the configured export name.
///
/// - [`ExportFormat::Js`]: `module.exports = {sidebar: [...]}`
/// - [`ExportFormat::Json`]: `{"sidebar": [...]}`
///
/// The result ends with a newline.
pub fn render_export(
    structure: &SidebarStructure,
    export: &ExportConfig,
) -> Result<String, ExportError> {
    let name = &export.name;
    let rendered = match export.format {
        ExportFormat::Js => {
            let body = serde_json::to_string_pretty(structure)?;
            format!("module.exports = {{{name}: {body}}}\n")
        }
        ExportFormat::Json => {
            let mut json = serde_json::to_string_pretty(&NamedExport { name, structure })?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

/// Render the sidebar and write it to `path`, creating parent directories.
pub fn write_export(
    structure: &SidebarStructure,
    export: &ExportConfig,
    path: &Path,
) -> Result<(), ExportError> {
    let rendered = render_export(structure, export)?;
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, rendered).map_err(io_error)?;

    tracing::info!(path = %path.display(), "Wrote sidebar");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::structure::SidebarEntry;

    fn sample() -> SidebarStructure {
        SidebarStructure {
            root: "/api/0.6.1/".to_owned(),
            entries: vec![SidebarEntry {
                title: "prefect".to_owned(),
                collapsable: true,
                children: vec!["triggers".to_owned()],
            }],
        }
    }

    fn export(format: ExportFormat) -> ExportConfig {
        ExportConfig {
            format,
            ..ExportConfig::default()
        }
    }

    #[test]
    fn test_render_js_module() {
        let rendered = render_export(&sample(), &export(ExportFormat::Js)).unwrap();

        assert_eq!(
            rendered,
            r#"module.exports = {sidebar: [
  "/api/0.6.1/",
  {
    "title": "prefect",
    "collapsable": true,
    "children": [
      "triggers"
    ]
  }
]}
"#
        );
    }

    #[test]
    fn test_render_json_round_trips_structure() {
        let rendered = render_export(&sample(), &export(ExportFormat::Json)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["sidebar"][0], "/api/0.6.1/");
        assert_eq!(value["sidebar"][1]["title"], "prefect");
        assert_eq!(value["sidebar"][1]["children"][0], "triggers");
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_render_json_keeps_key_order() {
        let rendered = render_export(&sample(), &export(ExportFormat::Json)).unwrap();

        assert_eq!(
            rendered,
            r#"{
  "sidebar": [
    "/api/0.6.1/",
    {
      "title": "prefect",
      "collapsable": true,
      "children": [
        "triggers"
      ]
    }
  ]
}
"#
        );
    }

    #[test]
    fn test_render_custom_export_name() {
        let config = ExportConfig {
            name: "apiSidebar".to_owned(),
            ..ExportConfig::default()
        };

        let rendered = render_export(&sample(), &config).unwrap();

        assert!(rendered.starts_with("module.exports = {apiSidebar: ["));
    }

    #[test]
    fn test_write_export_creates_parents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(".vuepress/generated/sidebar.js");

        write_export(&sample(), &export(ExportFormat::Js), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("module.exports = {sidebar: "));
    }

    #[test]
    fn test_write_export_reports_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("sidebar.js");

        let err = write_export(&sample(), &export(ExportFormat::Js), &path).unwrap_err();

        assert!(matches!(err, ExportError::Io { .. }));
        assert!(err.to_string().contains("sidebar.js"));
    }
}
