//! `sidebar list` command implementation.

use std::fmt::Write as _;

use clap::Args;
use sidebar_config::{CliSettings, Config};
use sidebar_index::{IdentifierBase, PathIndexer};
use sidebar_site::indexer_settings_from_config;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Section directory, relative to the documentation root.
    section: String,

    #[command(flatten)]
    source: SourceArgs,

    /// Print identifiers relative to the section instead of the root.
    #[arg(long)]
    relative_to_section: bool,
}

impl ListArgs {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the section can't be read.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            root_dir: self.source.root.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.source.config.as_deref(), Some(&cli_settings))?;

        let mut settings = indexer_settings_from_config(&config.docs);
        if self.relative_to_section {
            settings.base = IdentifierBase::Section;
        }
        let indexer = PathIndexer::with_settings(&config.docs.root_dir, settings)?;
        let ids = indexer.list_documents(&self.section)?;

        output.highlight(&format!("{} ({} documents)", self.section, ids.len()));
        output.result(&format_identifiers(&ids))?;
        Ok(())
    }
}

/// One quoted identifier per line, so the empty index identifier stays visible.
fn format_identifiers(ids: &[String]) -> String {
    let mut text = String::new();
    for id in ids {
        let _ = writeln!(text, "{id:?}");
    }
    text
}
