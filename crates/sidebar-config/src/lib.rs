//! Sidebar layout and configuration.
//!
//! The layout (documentation root, root identifier, ordered sections) is
//! built in: [`Config::builtin`] reproduces the API reference sidebar. A
//! `sidebar.toml` file, auto-discovered in the current directory or its
//! parents, can override any part of it.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `docs.root` and `export.output` support `${VAR}` and `${VAR:-default}`.
//!
//! ## Example
//!
//! ```toml
//! [docs]
//! root = "docs/api/0.6.1"
//! root_identifier = "/api/0.6.1/"
//!
//! [export]
//! format = "js"
//! output = "docs/.vuepress/sidebar.js"
//!
//! [[sections]]
//! title = "prefect"
//! children = ["triggers"]
//!
//! [[sections]]
//! title = "prefect.client"
//! dir = "client"
//! ```

mod expand;

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sidebar.toml";

/// Documentation root of the built-in layout, relative to the working directory.
const BUILTIN_ROOT_DIR: &str = "docs/api/0.6.1";

/// Identifier of the built-in layout's section index.
const BUILTIN_ROOT_IDENTIFIER: &str = "/api/0.6.1/";

/// Sections of the built-in layout indexed from a directory, in display order.
const BUILTIN_DIR_SECTIONS: &[(&str, &str)] = &[
    ("prefect.client", "client"),
    ("prefect.core", "core"),
    ("prefect.engine", "engine"),
    ("prefect.environments", "environments"),
    ("prefect.tasks", "tasks"),
    ("prefect.schedules", "schedules"),
    ("prefect.utilities", "utilities"),
];

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override documentation root.
    pub root_dir: Option<PathBuf>,
    /// Override root identifier.
    pub root_identifier: Option<String>,
    /// Override export format.
    pub format: Option<ExportFormat>,
    /// Override export destination.
    pub output: Option<PathBuf>,
    /// Override strict collision handling.
    pub strict: Option<bool>,
}

/// Output format of the exported sidebar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `module.exports = {sidebar: [...]}`
    #[default]
    Js,
    /// `{"sidebar": [...]}`
    Json,
}

/// Which directory document identifiers are relative to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierMode {
    /// Relative to the documentation root.
    #[default]
    Root,
    /// Relative to each section's directory.
    Section,
}

/// Where a section's children come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionSource<'a> {
    /// Hand-maintained identifiers, used verbatim.
    Literal(&'a [String]),
    /// Directory under the documentation root to index.
    Directory(&'a str),
}

/// One sidebar section as configured.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SectionConfig {
    /// Display title.
    pub title: String,
    /// Whether the section can be collapsed.
    #[serde(default = "default_collapsable")]
    pub collapsable: bool,
    /// Literal child identifiers, in display order. Must be unique.
    #[serde(default)]
    pub children: Option<Vec<String>>,
    /// Directory to index for children.
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_collapsable() -> bool {
    true
}

impl SectionConfig {
    /// Section with hand-maintained children.
    #[must_use]
    pub fn literal(title: &str, children: &[&str]) -> Self {
        Self {
            title: title.to_owned(),
            collapsable: true,
            children: Some(children.iter().map(|&c| c.to_owned()).collect()),
            dir: None,
        }
    }

    /// Section whose children are indexed from `dir`.
    #[must_use]
    pub fn directory(title: &str, dir: &str) -> Self {
        Self {
            title: title.to_owned(),
            collapsable: true,
            children: None,
            dir: Some(dir.to_owned()),
        }
    }

    /// Source of this section's children.
    ///
    /// Validated sections always have exactly one source; an invalid section
    /// with both reports its literal children.
    #[must_use]
    pub fn source(&self) -> SectionSource<'_> {
        match (&self.children, &self.dir) {
            (Some(children), _) => SectionSource::Literal(children),
            (None, Some(dir)) => SectionSource::Directory(dir),
            (None, None) => SectionSource::Literal(&[]),
        }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "sections[{index}].title cannot be empty"
            )));
        }
        let field = format!("sections[{index}] ({})", self.title);
        match (&self.children, &self.dir) {
            (Some(_), Some(_)) => Err(ConfigError::Validation(format!(
                "{field} sets both children and dir"
            ))),
            (None, None) => Err(ConfigError::Validation(format!(
                "{field} requires children or dir"
            ))),
            (None, Some(dir)) => require_relative(dir, &format!("{field}.dir")),
            (Some(children), None) => {
                let mut seen = HashSet::new();
                match children.iter().find(|child| !seen.insert(child.as_str())) {
                    Some(child) => Err(ConfigError::Validation(format!(
                        "{field}.children lists {child:?} more than once"
                    ))),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    root: Option<String>,
    root_identifier: Option<String>,
    extensions: Option<Vec<String>>,
    index_name: Option<String>,
    exclude: Option<Vec<String>>,
    identifiers: Option<IdentifierMode>,
    strict: Option<bool>,
}

/// Resolved documentation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocsConfig {
    /// Documentation root directory.
    pub root_dir: PathBuf,
    /// Identifier of the section index, emitted first in the sidebar.
    pub root_identifier: String,
    /// Content file extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Base name of index/overview files.
    pub index_name: String,
    /// Glob patterns of files to skip, relative to each section directory.
    pub exclude: Vec<String>,
    /// Directory identifiers are relative to.
    pub identifiers: IdentifierMode,
    /// Treat identifier collisions as fatal.
    pub strict: bool,
}

impl DocsConfig {
    fn builtin(base: &Path) -> Self {
        Self {
            root_dir: base.join(BUILTIN_ROOT_DIR),
            root_identifier: BUILTIN_ROOT_IDENTIFIER.to_owned(),
            extensions: vec!["md".to_owned()],
            index_name: "README".to_owned(),
            exclude: Vec::new(),
            identifiers: IdentifierMode::Root,
            strict: false,
        }
    }
}

/// Raw export configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    format: Option<ExportFormat>,
    name: Option<String>,
    output: Option<String>,
}

/// Resolved export configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportConfig {
    /// Output format.
    pub format: ExportFormat,
    /// Name the structure is exported under.
    pub name: String,
    /// Destination file; stdout when `None`.
    pub output: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Js,
            name: "sidebar".to_owned(),
            output: None,
        }
    }
}

/// Configuration file contents.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    docs: DocsConfigRaw,
    export: ExportConfigRaw,
    sections: Option<Vec<SectionConfig>>,
}

/// Resolved sidebar configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Documentation discovery settings.
    pub docs: DocsConfig,
    /// Export settings.
    pub export: ExportConfig,
    /// Sections in display order.
    pub sections: Vec<SectionConfig>,
    /// Path to the config file, if one was loaded.
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.root`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a path to stay inside the documentation root.
fn require_relative(value: &str, field: &str) -> Result<(), ConfigError> {
    let escapes = Path::new(value)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path inside docs.root"
        )));
    }
    Ok(())
}

/// Require a name usable as a JavaScript identifier.
fn require_js_identifier(value: &str, field: &str) -> Result<(), ConfigError> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if !valid {
        return Err(ConfigError::Validation(format!(
            "{field} must be a valid identifier, got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Built-in layout with paths relative to `base`.
    ///
    /// Root `docs/api/0.6.1`, root identifier `/api/0.6.1/`, a literal
    /// `prefect` section followed by one indexed section per package.
    #[must_use]
    pub fn builtin(base: &Path) -> Self {
        Self {
            docs: DocsConfig::builtin(base),
            export: ExportConfig::default(),
            sections: builtin_sections(),
            config_path: None,
        }
    }

    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `sidebar.toml` in the current directory and parents,
    /// falling back to the built-in layout.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result doesn't validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::builtin(&std::env::current_dir()?)
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root_dir) = &settings.root_dir {
            self.docs.root_dir.clone_from(root_dir);
        }
        if let Some(root_identifier) = &settings.root_identifier {
            self.docs.root_identifier.clone_from(root_identifier);
        }
        if let Some(format) = settings.format {
            self.export.format = format;
        }
        if let Some(output) = &settings.output {
            self.export.output = Some(output.clone());
        }
        if let Some(strict) = settings.strict {
            self.docs.strict = strict;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));

        let mut config = Self::from_toml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse TOML content, resolving relative paths against `config_dir`.
    ///
    /// Anything the file leaves out keeps its built-in value.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, environment expansion, or validation fails.
    pub fn from_toml(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Self::builtin(config_dir);

        let docs = file.docs;
        if let Some(root) = docs.root {
            config.docs.root_dir = config_dir.join(expand::expand_env(&root, "docs.root")?);
        }
        if let Some(root_identifier) = docs.root_identifier {
            config.docs.root_identifier = root_identifier;
        }
        if let Some(extensions) = docs.extensions {
            config.docs.extensions = extensions;
        }
        if let Some(index_name) = docs.index_name {
            config.docs.index_name = index_name;
        }
        if let Some(exclude) = docs.exclude {
            config.docs.exclude = exclude;
        }
        if let Some(identifiers) = docs.identifiers {
            config.docs.identifiers = identifiers;
        }
        if let Some(strict) = docs.strict {
            config.docs.strict = strict;
        }

        let export = file.export;
        if let Some(format) = export.format {
            config.export.format = format;
        }
        if let Some(name) = export.name {
            config.export.name = name;
        }
        if let Some(output) = export.output {
            let output = expand::expand_env(&output, "export.output")?;
            config.export.output = Some(config_dir.join(output));
        }

        if let Some(sections) = file.sections {
            config.sections = sections;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        require_js_identifier(&self.export.name, "export.name")?;
        for (index, section) in self.sections.iter().enumerate() {
            section.validate(index)?;
        }
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        let docs = &self.docs;
        require_non_empty(&docs.root_identifier, "docs.root_identifier")?;
        require_non_empty(&docs.index_name, "docs.index_name")?;
        if docs.index_name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "docs.index_name cannot contain a path separator".to_owned(),
            ));
        }

        if docs.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "docs.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &docs.extensions {
            require_non_empty(ext, "docs.extensions")?;
            if ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "docs.extensions entries are written without a dot, got {ext:?}"
                )));
            }
        }

        Ok(())
    }
}

fn builtin_sections() -> Vec<SectionConfig> {
    std::iter::once(SectionConfig::literal("prefect", &["triggers"]))
        .chain(
            BUILTIN_DIR_SECTIONS
                .iter()
                .map(|&(title, dir)| SectionConfig::directory(title, dir)),
        )
        .collect()
}
