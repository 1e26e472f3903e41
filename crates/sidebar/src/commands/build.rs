//! `sidebar build` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use sidebar_config::{CliSettings, Config, ExportFormat};
use sidebar_site::{SidebarAssembler, render_export, write_export};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Export format flag.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum FormatArg {
    /// `module.exports = {sidebar: [...]}`
    Js,
    /// `{"sidebar": [...]}`
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Js => Self::Js,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Arguments for the build command.
#[derive(Args, Debug)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Identifier of the section index, emitted first (overrides config).
    #[arg(long)]
    root_identifier: Option<String>,

    /// Export format (overrides config).
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Write to this file instead of stdout (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail when several files collapse to one identifier.
    #[arg(long)]
    strict: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a section can't be indexed,
    /// or the export can't be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.source.config.as_deref(), Some(&self.cli_settings()))?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!(
            "Documentation root: {}",
            config.docs.root_dir.display()
        ));

        let sidebar = SidebarAssembler::new(&config).assemble()?;

        match &config.export.output {
            Some(path) => {
                write_export(&sidebar, &config.export, path)?;
                output.success(&format!(
                    "Wrote {} sections to {}",
                    sidebar.entries.len(),
                    path.display()
                ));
            }
            None => output.result(&render_export(&sidebar, &config.export)?)?,
        }

        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            root_dir: self.source.root.clone(),
            root_identifier: self.root_identifier.clone(),
            format: self.format.map(ExportFormat::from),
            output: self.output.clone(),
            strict: self.strict.then_some(true),
        }
    }
}
